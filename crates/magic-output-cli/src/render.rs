use clap::ValueEnum;
use magic_output_core::{Category, LineEvent};
use owo_colors::OwoColorize;
use std::io::{self, IsTerminal, Write};

/// Foreground color and user-facing name a host shows for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub display_name: &'static str,
    pub rgb: (u8, u8, u8),
}

/// Reference palette.
pub fn style(category: Category) -> Style {
    let (display_name, rgb) = match category {
        Category::Error => ("Output Error", (255, 100, 100)),
        Category::Warning => ("Output Warning", (255, 200, 100)),
        Category::Success => ("Output Success", (100, 255, 100)),
        Category::Info => ("Output Info", (100, 180, 255)),
        Category::Debug => ("Output Debug", (180, 180, 180)),
        Category::Trace => ("Output Trace", (200, 150, 255)),
    };
    Style { display_name, rgb }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// ANSI colors on a terminal, plain labels otherwise
    Auto,
    /// 24-bit ANSI foreground colors
    Ansi,
    /// `[label]` prefixes
    Plain,
    /// One JSON event per line
    Json,
}

pub trait Render {
    fn render(&mut self, event: &LineEvent) -> io::Result<()>;
}

pub struct AnsiRenderer<W> {
    out: W,
}

impl<W: Write> Render for AnsiRenderer<W> {
    fn render(&mut self, event: &LineEvent) -> io::Result<()> {
        match event.category {
            Some(category) => {
                let (r, g, b) = style(category).rgb;
                writeln!(self.out, "{}", event.text.truecolor(r, g, b))
            }
            None => writeln!(self.out, "{}", event.text),
        }
    }
}

pub struct PlainRenderer<W> {
    out: W,
}

impl<W: Write> Render for PlainRenderer<W> {
    fn render(&mut self, event: &LineEvent) -> io::Result<()> {
        let label = event
            .category
            .map(|c| format!("[{c}]"))
            .unwrap_or_default();
        writeln!(self.out, "{label:<10}{}", event.text)
    }
}

pub struct JsonRenderer<W> {
    out: W,
}

impl<W: Write> Render for JsonRenderer<W> {
    fn render(&mut self, event: &LineEvent) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, event)?;
        writeln!(self.out)
    }
}

/// Picks a renderer for `format`, resolving `Auto` against whether stdout is a terminal.
pub fn renderer<W: Write + 'static>(format: Format, out: W) -> Box<dyn Render> {
    let format = match format {
        Format::Auto if io::stdout().is_terminal() => Format::Ansi,
        Format::Auto => Format::Plain,
        other => other,
    };
    log::debug!("rendering as {format:?}");
    match format {
        Format::Ansi => Box::new(AnsiRenderer { out }),
        Format::Json => Box::new(JsonRenderer { out }),
        Format::Plain | Format::Auto => Box::new(PlainRenderer { out }),
    }
}
