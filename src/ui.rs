//! Form renderer
//!
//! Draws the form to the terminal: text field, voice selector, slider
//! readouts with live values, the control button, and the wave strip that
//! stands in for the page background animation while speech is playing.

use crate::controller::Controller;
use crate::Result;
use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

/// Label column width, so field values line up
const FIELD_PREFIX: usize = 8;

/// Form renderer for the terminal
pub struct Ui {
    /// Terminal width in columns
    width: u16,
}

impl Ui {
    pub fn new(width: u16) -> Self {
        Self { width }
    }

    /// Update the terminal width after a resize
    pub fn resize(&mut self, width: u16) {
        self.width = width;
    }

    /// Redraw the whole form
    pub fn draw(&self, controller: &Controller) -> Result<()> {
        let mut out = io::stdout().lock();
        let width = self.width.max(20) as usize;

        // Clear screen, home cursor. Raw mode needs explicit \r\n.
        write!(out, "\x1b[2J\x1b[H")?;
        write!(out, "{} {}\r\n", crate::APP_NAME, crate::VERSION)?;
        write!(out, "{}\r\n", "-".repeat(width.min(60)))?;

        // Text field, tail-clipped so the cursor stays visible
        let text_width = width.saturating_sub(FIELD_PREFIX + 1);
        write!(
            out,
            "Text:   {}_\r\n",
            visible_tail(controller.text(), text_width)
        )?;

        // Voice selector
        match controller.options().get(controller.selected_index()) {
            Some(option) => write!(
                out,
                "Voice:  {} ({}/{})\r\n",
                option.label,
                controller.selected_index() + 1,
                controller.options().len()
            )?,
            None => write!(out, "Voice:  (no voices installed)\r\n")?,
        }

        // Sliders with live readouts
        write!(out, "Pitch:  {:.1}\r\n", controller.pitch())?;
        write!(out, "Rate:   {:.1}\r\n", controller.rate())?;
        write!(out, "Volume: {}\r\n", controller.volume())?;

        // Control button
        write!(out, "\r\n[ {} ]\r\n", controller.button_label())?;

        // Background animation strip
        if controller.animation_on() {
            write!(out, "{}\r\n", "~".repeat(width))?;
        } else {
            write!(out, "\r\n")?;
        }

        write!(
            out,
            "\r\nEnter speak/pause/resume | up/down voice | alt+p/P pitch | alt+r/R rate | alt+v/V volume | alt+q quit\r\n"
        )?;
        out.flush()?;

        Ok(())
    }
}

/// Longest suffix of `text` that fits in `max_width` display columns
fn visible_tail(text: &str, max_width: usize) -> &str {
    let mut start = 0;
    while text[start..].width() > max_width {
        match text[start..].chars().next() {
            Some(ch) => start += ch.len_utf8(),
            None => break,
        }
    }
    &text[start..]
}
