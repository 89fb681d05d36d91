//! Output formatting for terminal display

use colored::Colorize;
use crate::types::{CastResponse, HexagramView, PalaceLine, SolarResponse};

fn hexagram_heading(h: &HexagramView) -> String {
    format!(
        "#{} {} ({}) {}/{}",
        h.number, h.traditional_name, h.name, h.upper, h.lower
    )
}

/// 兄弟申金 世 → 官鬼巳火
fn palace_cell(line: &PalaceLine) -> String {
    let mut cell = line.najia.to_string();
    if line.is_shi {
        cell.push_str(" 世");
    } else if line.is_ying {
        cell.push_str(" 應");
    }
    if let Some(changed) = &line.changed {
        cell.push_str(&format!(" → {}", changed));
    }
    if let Some(hidden) = &line.hidden {
        cell.push_str(&format!(" (伏 {})", hidden));
    }
    cell
}

impl CastResponse {
    /// Format for terminal display (with colors), top line first
    pub fn to_terminal_string(&self) -> String {
        let mut out = Vec::with_capacity(self.lines.len() + 3);
        out.push(format!("本卦 {}", hexagram_heading(&self.primary)).bold().to_string());
        out.push(format!("  {}宮 {}", self.palace.palace.trigram.name(), self.palace.palace.kind));

        for line in self.lines.iter().rev() {
            let palace = self
                .palace
                .lines
                .get(line.position)
                .map(palace_cell)
                .unwrap_or_default();
            let row = format!(
                "  {}  {:<4} {:<14} {}",
                line.position_name, line.symbol, line.label, palace
            );
            out.push(row.color(line.kind.color()).to_string());
        }

        if self.has_changes {
            out.push(format!("變卦 {}", hexagram_heading(&self.transformed)).bold().to_string());
        } else {
            out.push("無變卦 (static reading)".dimmed().to_string());
        }
        out.join("\n")
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        let tosses: Vec<String> = self.lines.iter().map(|l| l.backs.to_string()).collect();
        let moving: Vec<String> = self.moving_positions.iter().map(|p| p.to_string()).collect();
        format!(
            "tosses={} | primary={:06b} #{} {} | transformed={:06b} #{} {} | moving=[{}] | palace={}{} shi={}",
            tosses.join(","),
            self.primary_pattern,
            self.primary.number,
            self.primary.traditional_name,
            self.transformed_pattern,
            self.transformed.number,
            self.transformed.traditional_name,
            moving.join(","),
            self.palace.palace.trigram.name(),
            self.palace.palace.kind,
            self.palace.palace.shi,
        )
    }
}

impl SolarResponse {
    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        if !self.location_found {
            return format!(
                "{} {} (unknown location {:?}, no correction applied)",
                "真太陽時".bold(),
                self.corrected_date,
                self.location
            )
            .yellow()
            .to_string();
        }
        let mut out = format!(
            "{} {} → {}\n  longitude {:+.2} min | equation of time {:+.2} min | total {:+.2} min",
            "真太陽時".bold(),
            self.input_date,
            self.corrected_date.green(),
            self.longitude_offset_minutes,
            self.equation_of_time_minutes,
            self.total_offset_minutes,
        );
        if let Some(note) = &self.note {
            out.push_str(&format!("\n  {}", note.cyan()));
        }
        out
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "corrected={} | longitude={:.4} | eot={:.4} | total={:.4} | found={} | shichen={}->{}",
            self.corrected_date,
            self.longitude_offset_minutes,
            self.equation_of_time_minutes,
            self.total_offset_minutes,
            self.location_found,
            self.input_shichen,
            self.corrected_shichen,
        )
    }
}
