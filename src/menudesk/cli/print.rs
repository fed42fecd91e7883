use colored::Colorize;
use menudesk::api::{CmdMessage, MessageLevel};
use menudesk::model::Restaurant;
use menudesk::working_set::{ListedProduct, ListedRestaurant};
use std::io::{self, Write};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;

pub(crate) fn print_messages<W: Write>(out: &mut W, messages: &[CmdMessage]) -> io::Result<()> {
    for message in messages {
        match message.level {
            MessageLevel::Info => writeln!(out, "{}", message.content.dimmed())?,
            MessageLevel::Success => writeln!(out, "{}", message.content.green())?,
            MessageLevel::Warning => writeln!(out, "{}", message.content.yellow())?,
            MessageLevel::Error => writeln!(out, "{}", message.content.red())?,
        }
    }
    Ok(())
}

pub(crate) fn print_error<W: Write>(out: &mut W, message: impl std::fmt::Display) -> io::Result<()> {
    writeln!(out, "{} {}", "Error:".red().bold(), message)
}

pub(crate) fn print_restaurants<W: Write>(
    out: &mut W,
    heading: &str,
    restaurants: &[ListedRestaurant],
) -> io::Result<()> {
    if restaurants.is_empty() {
        return Ok(());
    }
    writeln!(out, "\n{}", heading.bold())?;
    for lr in restaurants {
        let idx = format!("{}. ", lr.index);
        let available = LINE_WIDTH.saturating_sub(idx.width());
        let summary = truncate_to_width(&lr.restaurant.summary(), available);
        writeln!(out, "{}{}", idx.yellow(), summary)?;
    }
    Ok(())
}

pub(crate) fn print_details<W: Write>(out: &mut W, restaurant: &Restaurant) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", restaurant)
}

pub(crate) fn print_menu<W: Write>(
    out: &mut W,
    restaurant: &Restaurant,
    products: &[ListedProduct],
    currency: &str,
) -> io::Result<()> {
    if products.is_empty() {
        return writeln!(out, "{}", "The menu is empty.".dimmed());
    }
    writeln!(out, "Menu of '{}':", restaurant.name.bold())?;
    for lp in products {
        let line = lp.product.describe(currency);
        let line = if lp.product.is_available() {
            line.normal()
        } else {
            line.dimmed()
        };
        writeln!(out, "{}. {}", lp.index, line)?;
    }
    Ok(())
}

/// Cuts `s` to at most `max_width` columns, ending in `…` when anything was
/// dropped.
fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let budget = max_width.saturating_sub(1);
    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > budget {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
