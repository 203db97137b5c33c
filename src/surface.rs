/// The opaque drawing surface entities render to.
///
/// Coordinates are virtual-canvas units (see `constants::WORLD_WIDTH`); the
/// backend scales them to whatever it is actually drawing on. Entities call
/// this only from `render`, never from `update`.

/// Small palette shared by all entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Black,
    White,
    Grey,
    DarkGrey,
    Red,
    Green,
    Blue,
    LightBlue,
    Cyan,
    Yellow,
    Gold,
    Magenta,
    Pink,
    Purple,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

pub trait Surface {
    /// Wipes the whole frame.
    fn clear(&mut self);

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);

    /// Draws a text run anchored at (x, y). `size` is a font-size hint in
    /// virtual units; backends without scalable text may ignore it.
    fn text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color, align: Align);
}
