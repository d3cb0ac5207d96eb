use crate::colour::Colour;
use crate::image::Image;
use crate::metrics::FontSpec;
use crate::rect::Rect;
use crate::units::Px;
use id_arena::Id;

/// A single line of text positioned by its baseline
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub font: FontSpec,
    /// Left edge of the run
    pub x: Px,
    /// Baseline, measured down from the top of the paint area
    pub baseline: Px,
}

/// A drawing instruction. Coordinates are device pixels relative to the
/// top-left corner of the page's paint area; y grows downwards.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Text(TextRun),
    Image { image: Id<Image>, rect: Rect<Px> },
    /// A stroked rectangle outline, used for table grids and the debug overlay
    Outline { rect: Rect<Px>, colour: Colour },
}

/// The drawing commands of one finished page
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LaidOutPage {
    /// 1-based page number
    pub number: u32,
    pub commands: Vec<DrawCommand>,
}

impl LaidOutPage {
    pub fn new(number: u32) -> LaidOutPage {
        LaidOutPage {
            number,
            commands: Vec::new(),
        }
    }

    /// Iterate over the text runs on this page
    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text(run) => Some(run),
            _ => None,
        })
    }
}
