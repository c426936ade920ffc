//! Markdown output for the terminal.
//!
//! Every command result is a Markdown string produced by the core display
//! types. With color on, headings keep their `#` markers and are tinted by
//! level, and all other lines go through termimad's inline styling.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::DarkGrey);
        skin.inline_code.set_bg(Color::AnsiValue(238));
        skin.code_block.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Prints `markdown` to stdout.
    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            if !markdown.ends_with('\n') {
                println!();
            }
            return Ok(());
        }

        for line in markdown.lines() {
            match heading_color(line) {
                Some(color) => println!("\x1b[{color}m{line}\x1b[0m"),
                None => {
                    self.skin.print_inline(line);
                    println!();
                }
            }
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

/// ANSI color code for a heading line: blue for page titles, cyan below.
fn heading_color(line: &str) -> Option<u8> {
    let level = line.chars().take_while(|c| *c == '#').count();
    match level {
        0 => None,
        1 => Some(34),
        _ => Some(36),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_renderer() {
        let renderer = TerminalRenderer::new(false);
        assert!(!renderer.rich_enabled);
    }

    #[test]
    fn test_default_is_rich() {
        assert!(TerminalRenderer::default().rich_enabled);
    }

    #[test]
    fn test_heading_color_by_level() {
        assert_eq!(heading_color("# Camps"), Some(34));
        assert_eq!(heading_color("## Sessions"), Some(36));
        assert_eq!(heading_color("- **Camp Birchwood**"), None);
    }
}
