//! Help text assembly for a command node

use crate::config::Text;
use crate::dispatch::Scope;
use crate::help::entry::HelpEntry;
use crate::tree::{CommandNode, NodeKind};
use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Single-line usage, e.g. `$> roast [options] vpc create <name>`
pub fn usage_line(node: &CommandNode, scope: &Scope) -> String {
    let usage = format!(
        "$> {} [options] {} {}",
        scope.executable(),
        scope.ancestors().join(" "),
        node.command()
    );
    let mut usage = WHITESPACE.replace_all(&usage, " ").trim().to_string();

    match node.kind() {
        NodeKind::Router(children) => {
            let keywords: Vec<&str> = children.iter().map(|child| child.command()).collect();
            usage.push_str(&format!(" ({})", keywords.join("|")));
        }
        NodeKind::Leaf { arguments, .. } => {
            for arg in arguments {
                usage.push(' ');
                usage.push_str(&arg.token());
            }
        }
    }

    usage
}

/// Build the help of `node` as seen from `scope`
pub fn generate_help(node: &CommandNode, scope: &Scope) -> HelpEntry {
    let mut help = HelpEntry::new();

    help.blank()
        .line("Usage:")
        .blank()
        .nest([usage_line(node, scope)].into_iter().collect());

    if !node.description().is_empty() {
        help.blank().nest(block(node.description()));
    }

    let listing = listing(node);
    if !listing.is_empty() {
        help.blank().nest(listing);
    }

    // Routers own no options; they belong to the eventual leaf
    if node.is_leaf() && !scope.options().is_empty() {
        let options = scope
            .options()
            .iter()
            .map(|option| {
                let mut line = option.syntax();
                if !option.description.is_empty() {
                    line.push_str(&format!(" - {}", option.description));
                }
                if let Some(default) = &option.default {
                    line.push_str(&format!(" (default: {})", default));
                }
                line
            })
            .collect();

        help.blank().line("Options:").blank().nest(options);
    }

    if !node.examples().is_empty() {
        help.blank()
            .line("Examples:")
            .blank()
            .nest(HelpEntry::from(node.examples()));
    }

    help.blank();
    help
}

/// Description lines, all at the same depth
fn block(text: &Text) -> HelpEntry {
    match text {
        Text::Line(line) => [line.clone()].into_iter().collect(),
        Text::Lines(lines) => lines.iter().cloned().collect(),
    }
}

/// Bulleted list of subcommands or positional arguments
fn listing(node: &CommandNode) -> HelpEntry {
    let mut entry = HelpEntry::new();

    for child in node.children() {
        bullet(&mut entry, child.command(), child.description());
    }
    for arg in node.arguments() {
        bullet(&mut entry, &arg.token(), &arg.description);
    }

    entry
}

fn bullet(entry: &mut HelpEntry, name: &str, description: &Text) {
    match description {
        Text::Line(line) if line.is_empty() => entry.line(format!("* {}", name)),
        Text::Line(line) => entry.line(format!("* {} - {}", name, line)),
        Text::Lines(_) => entry.line(format!("* {} -", name)).text(description),
    };
}
