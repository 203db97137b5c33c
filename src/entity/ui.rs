/// Menu-screen building blocks: static text and clickable buttons.
use crate::entity::{Command, Frame};
use crate::rect::Rect;
use crate::surface::{Align, Color, Surface};

/// Static centered text. Never removes itself.
#[derive(Clone, Debug)]
pub struct Label {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub size: f32,
    pub color: Color,
}

impl Label {
    pub fn new(x: f32, y: f32, text: impl Into<String>, size: f32, color: Color) -> Self {
        Label {
            x,
            y,
            text: text.into(),
            size,
            color,
        }
    }

    pub fn update(&mut self, _frame: &mut Frame) -> bool {
        false
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        surface.text(&self.text, self.x, self.y, self.size, self.color, Align::Center);
    }
}

/// A clickable button that enqueues one director command. Clicks are
/// consumed so a single press never triggers two overlapping buttons.
#[derive(Clone, Debug)]
pub struct Button {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub text: String,
    pub action: Command,
    hovered: bool,
}

impl Button {
    pub fn new(x: f32, y: f32, w: f32, h: f32, text: impl Into<String>, action: Command) -> Self {
        Button {
            x,
            y,
            w,
            h,
            text: text.into(),
            action,
            hovered: false,
        }
    }

    fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    pub fn update(&mut self, frame: &mut Frame) -> bool {
        self.hovered = self.rect().contains(frame.input.mouse_x, frame.input.mouse_y);

        if self.hovered && frame.input.clicked {
            frame.commands.push(self.action);
            frame.input.consume_click();
        }

        false
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        let fill = if self.hovered { Color::Pink } else { Color::Magenta };
        surface.fill_rect(self.x, self.y, self.w, self.h, fill);
        surface.stroke_rect(self.x, self.y, self.w, self.h, Color::Magenta);
        surface.text(
            &self.text,
            self.x + self.w / 2.0,
            self.y + self.h / 2.0,
            18.0,
            Color::White,
            Align::Center,
        );
    }
}
