//! Lane rendering
//!
//! Draws every visible card copy of a `LaneFrame` as a bordered box. The tilt
//! is approximated with a per-row horizontal shear.

use std::sync::Arc;

use marquee_core::config::{Axis, LaneSettings};
use marquee_core::engine::{Item, ItemId, Lane, LaneFrame, Phase, Placement};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::pointer::CELL_UNITS;

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f32 = 2.0;

/// Build a lane of text cards from labels
///
/// Vertical cards are `item_extent` rows tall. Horizontal cards widen to fit
/// their label.
pub fn lane_from_labels(labels: &[String], settings: &LaneSettings, axis: Axis) -> Lane<str> {
    let items = labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let cells = match axis {
                Axis::Vertical => settings.item_extent,
                Axis::Horizontal => {
                    let fit = u16::try_from(label.width() + 4).unwrap_or(u16::MAX);
                    settings.item_extent.max(fit)
                }
            };
            Item::new(
                ItemId(i as u64),
                Arc::from(label.as_str()),
                f32::from(cells) * CELL_UNITS,
            )
        })
        .collect();
    Lane::new(items, f32::from(settings.gap) * CELL_UNITS)
}

/// Truncate `text` to `max` display columns, marking the cut with an ellipsis
pub fn truncate_label(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Card bounds in area-relative cells, end-exclusive
#[derive(Debug, Clone, Copy)]
struct CardRect {
    x0: i32,
    x1: i32,
    y0: i32,
    y1: i32,
}

/// Widget for one frame of the lane
pub struct LaneWidget<'a> {
    frame: LaneFrame<'a, str>,
}

impl<'a> LaneWidget<'a> {
    pub fn new(frame: LaneFrame<'a, str>) -> Self {
        Self { frame }
    }

    fn border_style(&self) -> Style {
        let color = match (self.frame.phase, self.frame.hovered) {
            (Phase::Dragging, _) => Color::Yellow,
            (_, true) => Color::Cyan,
            _ => Color::DarkGray,
        };
        Style::default().fg(color)
    }

    fn shear(&self) -> f32 {
        self.frame
            .tilt
            .map(|tilt| tilt.shear() * CELL_ASPECT)
            .unwrap_or(0.0)
    }

    fn card_rect(&self, area: Rect, placement: &Placement<'_, str>, margin: i32) -> CardRect {
        let start = (placement.start / CELL_UNITS).round() as i32;
        let len = ((placement.extent / CELL_UNITS).round() as i32).max(1);
        match self.frame.axis {
            Axis::Vertical => {
                let width = i32::from(area.width);
                let (x0, x1) = if width - 2 * margin >= 6 {
                    (margin, width - margin)
                } else {
                    (0, width)
                };
                CardRect {
                    x0,
                    x1,
                    y0: start,
                    y1: start + len,
                }
            }
            Axis::Horizontal => CardRect {
                x0: start,
                x1: start + len,
                y0: 0,
                y1: i32::from(area.height),
            },
        }
    }
}

fn put(buf: &mut Buffer, area: Rect, col: i32, row: i32, ch: char, style: Style) {
    if col < 0 || row < 0 || col >= i32::from(area.width) || row >= i32::from(area.height) {
        return;
    }
    let (x, y) = (area.x + col as u16, area.y + row as u16);
    if let Some(cell) = buf.cell_mut((x, y)) {
        cell.set_char(ch).set_style(style);
    }
}

fn draw_card(
    buf: &mut Buffer,
    area: Rect,
    card: CardRect,
    label: &str,
    shear: f32,
    border: Style,
    text: Style,
) {
    let height = card.y1 - card.y0;
    let center = i32::from(area.height) / 2;
    let label_row = card.y0 + height / 2;

    for row in card.y0.max(0)..card.y1.min(i32::from(area.height)) {
        let shift = ((row - center) as f32 * shear).round() as i32;
        let (left, right) = (card.x0 + shift, card.x1 - 1 + shift);
        let top = height >= 2 && row == card.y0;
        let bottom = height >= 2 && row == card.y1 - 1;

        for col in left..=right {
            let ch = match (top, bottom, col == left, col == right) {
                (true, _, true, _) => '┌',
                (true, _, _, true) => '┐',
                (_, true, true, _) => '└',
                (_, true, _, true) => '┘',
                (true, _, _, _) | (_, true, _, _) => '─',
                (_, _, true, _) | (_, _, _, true) => '│',
                _ => ' ',
            };
            put(buf, area, col, row, ch, border);
        }

        if row == label_row && !top && !bottom {
            let inner = usize::try_from(right - left - 3).unwrap_or(0);
            let label = truncate_label(label, inner);
            let mut col = left + 2;
            for ch in label.chars() {
                put(buf, area, col, row, ch, text);
                col += ch.width().unwrap_or(0) as i32;
            }
        }
    }
}

impl Widget for LaneWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        if self.frame.is_empty() {
            let message = "No items";
            let x = area.x + area.width.saturating_sub(message.width() as u16) / 2;
            let y = area.y + area.height / 2;
            buf.set_stringn(
                x,
                y,
                message,
                area.width as usize,
                Style::default().fg(Color::DarkGray),
            );
            return;
        }

        let viewport = match self.frame.axis {
            Axis::Vertical => f32::from(area.height) * CELL_UNITS,
            Axis::Horizontal => f32::from(area.width) * CELL_UNITS,
        };
        let shear = self.shear();
        let margin = (f32::from(area.height) / 2.0 * shear.abs()).ceil() as i32;
        let border = self.border_style();
        let text = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

        for placement in self.frame.visible(viewport) {
            let card = self.card_rect(area, &placement, margin);
            draw_card(
                buf,
                area,
                card,
                placement.item.content(),
                shear,
                border,
                text,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_core::config::TiltDirection;
    use marquee_core::engine::TiltTransform;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn frame<'a>(lane: &'a Lane<str>, offset: f32, axis: Axis) -> LaneFrame<'a, str> {
        LaneFrame {
            lane,
            offset,
            phase: Phase::Idle,
            hovered: false,
            axis,
            tilt: None,
        }
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    fn first_drawn(buf: &Buffer, y: u16) -> Option<u16> {
        (0..buf.area.width).find(|&x| buf[(x, y)].symbol() != " ")
    }

    #[test]
    fn test_vertical_cards_stack_with_gaps() {
        let lane = lane_from_labels(
            &labels(&["alpha", "beta"]),
            &LaneSettings::default(),
            Axis::Vertical,
        );
        let area = Rect::new(0, 0, 20, 12);
        let mut buf = Buffer::empty(area);
        LaneWidget::new(frame(&lane, 0.0, Axis::Vertical)).render(area, &mut buf);

        assert_eq!(buf[(0, 0)].symbol(), "┌");
        assert!(row_text(&buf, 1).contains("alpha"));
        assert_eq!(buf[(0, 2)].symbol(), "└");
        assert_eq!(row_text(&buf, 3).trim(), "");
        assert!(row_text(&buf, 5).contains("beta"));
        // Second copy follows one cycle later
        assert!(row_text(&buf, 9).contains("alpha"));
    }

    #[test]
    fn test_offset_moves_cards() {
        let lane = lane_from_labels(
            &labels(&["alpha", "beta"]),
            &LaneSettings::default(),
            Axis::Vertical,
        );
        let area = Rect::new(0, 0, 20, 12);
        let mut buf = Buffer::empty(area);
        LaneWidget::new(frame(&lane, CELL_UNITS, Axis::Vertical)).render(area, &mut buf);

        assert_eq!(buf[(0, 1)].symbol(), "┌");
        assert!(row_text(&buf, 2).contains("alpha"));
        assert_eq!(buf[(0, 3)].symbol(), "└");
        // Gap after the previous copy's last card
        assert_eq!(row_text(&buf, 0).trim(), "");
    }

    #[test]
    fn test_tilt_shears_rows() {
        let lane = lane_from_labels(
            &labels(&["one", "two", "three"]),
            &LaneSettings::default(),
            Axis::Vertical,
        );
        let area = Rect::new(0, 0, 40, 12);
        let mut frame = frame(&lane, 0.0, Axis::Vertical);
        frame.tilt = Some(TiltTransform::for_direction(TiltDirection::Left));
        let mut buf = Buffer::empty(area);
        LaneWidget::new(frame).render(area, &mut buf);

        let top = first_drawn(&buf, 0).unwrap();
        let bottom = first_drawn(&buf, 10).unwrap();
        assert!(bottom > top, "lower rows lean right: {top} vs {bottom}");
    }

    #[test]
    fn test_horizontal_cards_fit_labels() {
        let settings = LaneSettings::default();
        let lane = lane_from_labels(&labels(&["wide label"]), &settings, Axis::Horizontal);
        assert_eq!(lane.items()[0].extent(), 14.0 * CELL_UNITS);

        let area = Rect::new(0, 0, 40, 3);
        let mut buf = Buffer::empty(area);
        LaneWidget::new(frame(&lane, 0.0, Axis::Horizontal)).render(area, &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), "┌");
        assert!(row_text(&buf, 1).contains("wide label"));
    }

    #[test]
    fn test_empty_lane_placeholder() {
        let lane = Lane::<str>::empty();
        let area = Rect::new(0, 0, 20, 5);
        let mut buf = Buffer::empty(area);
        LaneWidget::new(frame(&lane, 0.0, Axis::Vertical)).render(area, &mut buf);
        assert!(row_text(&buf, 2).contains("No items"));
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("short", 10), "short");
        assert_eq!(truncate_label("Paragraph Item 14", 8), "Paragra…");
        assert_eq!(truncate_label("日本語テキスト", 5), "日本…");
        assert_eq!(truncate_label("anything", 0), "");
    }
}
