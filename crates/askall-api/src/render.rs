//! Terminal markdown rendering with syntax-highlighted code blocks.
//!
//! Prose goes through `termimad`; fenced code blocks are highlighted with
//! `syntect`.

use syntect::easy::HighlightLines;
use syntect::highlighting::{Style, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::as_24_bit_terminal_escaped;
use termimad::MadSkin;
use termimad::crossterm::style::Color;

const THEME: &str = "base16-ocean.dark";

pub struct MarkdownRenderer {
    skin: MadSkin,
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        let mut skin = MadSkin::default_dark();
        skin.headers[0].set_fg(Color::Cyan);
        skin.headers[1].set_fg(Color::Cyan);
        skin.inline_code.set_fg(Color::Yellow);

        Self {
            skin,
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
        }
    }

    /// Render markdown for the terminal.
    pub fn render(&self, markdown: &str) -> String {
        let mut output = String::new();
        let mut in_code_block = false;
        let mut code_lang = String::new();
        let mut code_buf = String::new();

        for line in markdown.lines() {
            let fence = line.trim_start().starts_with("```");
            if fence && !in_code_block {
                in_code_block = true;
                code_lang = line.trim_start().trim_start_matches('`').trim().to_string();
                code_buf.clear();
            } else if fence {
                in_code_block = false;
                output.push_str(&self.highlight_code(&code_buf, &code_lang));
                output.push('\n');
            } else if in_code_block {
                code_buf.push_str(line);
                code_buf.push('\n');
            } else {
                output.push_str(&self.skin.term_text(line).to_string());
            }
        }

        if in_code_block && !code_buf.is_empty() {
            output.push_str(&self.highlight_code(&code_buf, &code_lang));
        }

        output
    }

    fn highlight_code(&self, code: &str, lang: &str) -> String {
        let syntax = if lang.is_empty() {
            self.syntax_set.find_syntax_plain_text()
        } else {
            self.syntax_set
                .find_syntax_by_token(lang)
                .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
        };

        let Some(theme) = self.theme_set.themes.get(THEME) else {
            return code.to_string();
        };
        let mut h = HighlightLines::new(syntax, theme);

        let mut output = String::new();
        if !lang.is_empty() {
            output.push_str(&format!("  {}\n", console::style(format!("--- {lang} ---")).dim()));
        }
        for line in code.lines() {
            let ranges: Vec<(Style, &str)> = h
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_default();
            let escaped = as_24_bit_terminal_escaped(&ranges[..], false);
            output.push_str(&format!("  {escaped}\x1b[0m\n"));
        }
        output
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prose_text_survives() {
        let out = MarkdownRenderer::new().render("# ChatGPT\n\nHello **world**");
        assert!(out.contains("ChatGPT"));
        assert!(out.contains("world"));
    }

    #[test]
    fn test_code_block_highlighted() {
        let md = "Intro\n```rust\nfn main() {}\n```\nAfter";
        let out = MarkdownRenderer::new().render(md);
        assert!(out.contains("--- rust ---"));
        assert!(out.contains("\x1b["));
        assert!(out.contains("After"));
    }

    #[test]
    fn test_unclosed_code_block_still_rendered() {
        let out = MarkdownRenderer::new().render("```\nlet x = 1;");
        assert!(out.contains("let x = 1;"));
    }
}
