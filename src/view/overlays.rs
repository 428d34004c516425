//! Notification overlay

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::model::{Notification, NotificationLevel};

pub fn render_notification(frame: &mut Frame, notification: &Notification) {
    let area = frame.area();
    let color = match notification.level {
        NotificationLevel::Info => Color::Cyan,
        NotificationLevel::Error => Color::Red,
    };

    // Fixed width popup (responsive to screen size)
    let popup_width = 52.min(area.width.saturating_sub(4));
    let inner_width = popup_width.saturating_sub(4).max(1) as usize; // account for borders

    let line_count = ((notification.message.chars().count() as f32) / (inner_width as f32)).ceil() as u16;
    let popup_height = (2 + line_count.max(1)).min(area.height.saturating_sub(4));

    let popup_area = Rect {
        x: area.width.saturating_sub(popup_width) / 2,
        y: area.height.saturating_sub(popup_height) / 2,
        width: popup_width,
        height: popup_height,
    };

    frame.render_widget(Clear, popup_area);

    let title = format!(
        " {} (Esc to dismiss) ",
        notification.raised_wall.format("%H:%M:%S")
    );
    let widget = Paragraph::new(notification.message.as_str())
        .style(Style::default().fg(color))
        .wrap(ratatui::widgets::Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(title)
                .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        );

    frame.render_widget(widget, popup_area);
}
