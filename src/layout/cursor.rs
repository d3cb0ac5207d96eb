use super::command::{DrawCommand, LaidOutPage, TextRun};
use crate::metrics::{FontSpec, MetricsProvider};
use crate::units::Px;

/// Where the trailing page number is stamped
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageStamp {
    pub font: FontSpec,
    /// Gap between the number's right edge and the right edge of the paint area
    pub right_inset: Px,
    /// Distance of the number's baseline below the bottom of the paint area
    pub baseline_drop: Px,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    Idle,
    Active,
    Closed,
}

/// The running write position: which page content goes on and how far down
/// it is. Owns the pages produced so far and their numbering.
///
/// Page numbers start at 1 and only ever increase. Every page turn stamps the
/// number of the page being left; closing stamps the last page, unless the
/// document is a single page, in which case no number is drawn at all.
#[derive(Debug, Clone)]
pub struct FlowCursor {
    state: CursorState,
    page_width: Px,
    page_height: Px,
    offset: Px,
    stamp: PageStamp,
    pages: Vec<LaidOutPage>,
}

impl FlowCursor {
    pub fn new(page_width: Px, page_height: Px, stamp: PageStamp) -> FlowCursor {
        FlowCursor {
            state: CursorState::Idle,
            page_width,
            page_height,
            offset: Px::ZERO,
            stamp,
            pages: Vec::new(),
        }
    }

    /// Open the first page. Does nothing unless the cursor is idle.
    pub fn begin(&mut self) {
        if self.state != CursorState::Idle {
            return;
        }
        self.state = CursorState::Active;
        self.pages.push(LaidOutPage::new(1));
        self.offset = Px::ZERO;
    }

    pub fn state(&self) -> CursorState {
        self.state
    }

    /// The current 1-based page number, 0 before [FlowCursor::begin]
    pub fn page(&self) -> u32 {
        self.pages.last().map(|p| p.number).unwrap_or(0)
    }

    pub fn offset(&self) -> Px {
        self.offset
    }

    pub fn page_width(&self) -> Px {
        self.page_width
    }

    pub fn page_height(&self) -> Px {
        self.page_height
    }

    /// Vertical space left on the current page
    pub fn remaining(&self) -> Px {
        (self.page_height - self.offset).max(Px::ZERO)
    }

    /// Whether `height` fits below the current position
    pub fn fits(&self, height: Px) -> bool {
        self.offset + height <= self.page_height
    }

    /// Whether nothing has been placed on the current page yet
    pub fn at_page_top(&self) -> bool {
        self.offset <= Px::ZERO
    }

    /// Move the write position by `delta` without placing content. The
    /// position never goes above the top of the page.
    pub fn skip(&mut self, delta: Px) {
        self.offset = (self.offset + delta).max(Px::ZERO);
    }

    /// Queue a drawing command on the current page. Ignored unless active.
    pub fn draw(&mut self, command: DrawCommand) {
        if self.state != CursorState::Active {
            return;
        }
        if let Some(page) = self.pages.last_mut() {
            page.commands.push(command);
        }
    }

    /// Stamp the current page's number, then continue at the top of a new page
    pub fn new_page(&mut self, metrics: &dyn MetricsProvider) {
        if self.state != CursorState::Active {
            return;
        }
        self.stamp_page_number(metrics);
        let number = self.page() + 1;
        log::debug!("turning to page {number}");
        self.pages.push(LaidOutPage::new(number));
        self.offset = Px::ZERO;
    }

    /// Finish the document and hand over its pages
    pub fn close(&mut self, metrics: &dyn MetricsProvider) -> Vec<LaidOutPage> {
        if self.state == CursorState::Active && self.pages.len() > 1 {
            self.stamp_page_number(metrics);
        }
        self.state = CursorState::Closed;
        std::mem::take(&mut self.pages)
    }

    fn stamp_page_number(&mut self, metrics: &dyn MetricsProvider) {
        let text = self.page().to_string();
        let width = metrics.advance_width(&self.stamp.font, &text);
        let run = TextRun {
            x: self.page_width - width - self.stamp.right_inset,
            baseline: self.page_height + self.stamp.baseline_drop,
            font: self.stamp.font,
            text,
        };
        self.draw(DrawCommand::Text(run));
    }
}
