use image::RgbaImage;
use tracing::debug;

use crate::annotation::raster::{InkLayer, StrokeStyle};
use crate::annotation::shapes::{ArrowHead, Shape};
use crate::annotation::Tool;
use crate::geometry::Point;

/// In-progress drawing gesture, in native pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
enum DrawGesture {
    Pen { last: Point },
    Shape {
        tool: Tool,
        start: Point,
        current: Option<Point>,
    },
}

/// Annotation overlay: a committed ink layer plus an ephemeral preview layer.
///
/// Both layers always have the native pixel dimensions of the displayed
/// image. Pen strokes go straight to the committed layer. Circle and arrow
/// gestures redraw the preview layer from scratch on every move, so earlier
/// preview frames can never remain; the final preview is merged into the
/// committed layer when the gesture ends.
#[derive(Clone, Debug)]
pub struct AnnotationSurface {
    committed: InkLayer,
    preview: InkLayer,
    tool: Tool,
    style: StrokeStyle,
    head: ArrowHead,
    gesture: Option<DrawGesture>,
}

impl AnnotationSurface {
    pub fn new(width: u32, height: u32, style: StrokeStyle, head: ArrowHead) -> Self {
        Self {
            committed: InkLayer::new(width, height),
            preview: InkLayer::new(width, height),
            tool: Tool::None,
            style,
            head,
            gesture: None,
        }
    }

    /// Replace both layers with blank ones of the new native size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.committed = InkLayer::new(width, height);
        self.preview = InkLayer::new(width, height);
        self.gesture = None;
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.committed.dimensions()
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn arrow_head(&self) -> ArrowHead {
        self.head
    }

    /// Select a tool; selecting the active tool again deselects it.
    ///
    /// Any gesture in progress is abandoned. Returns the resulting tool.
    pub fn select_tool(&mut self, tool: Tool) -> Tool {
        self.cancel_gesture();
        self.tool = if self.tool == tool { Tool::None } else { tool };
        self.tool
    }

    pub fn deselect_tool(&mut self) {
        self.cancel_gesture();
        self.tool = Tool::None;
    }

    pub fn is_drawing(&self) -> bool {
        self.gesture.is_some()
    }

    /// Start a gesture at a native point. Returns false when no tool is active.
    pub fn begin_gesture(&mut self, at: Point) -> bool {
        self.gesture = match self.tool {
            Tool::None => None,
            Tool::Pen => Some(DrawGesture::Pen { last: at }),
            Tool::Circle | Tool::Arrow => {
                self.preview.clear();
                Some(DrawGesture::Shape {
                    tool: self.tool,
                    start: at,
                    current: None,
                })
            }
        };
        self.gesture.is_some()
    }

    /// Continue the active gesture to a native point.
    pub fn move_gesture(&mut self, at: Point) {
        match self.gesture {
            None => {}
            Some(DrawGesture::Pen { last }) => {
                self.committed.stroke_segment(last, at, &self.style);
                self.gesture = Some(DrawGesture::Pen { last: at });
            }
            Some(DrawGesture::Shape { tool, start, .. }) => {
                self.gesture = Some(DrawGesture::Shape {
                    tool,
                    start,
                    current: Some(at),
                });
                self.redraw_preview();
            }
        }
    }

    /// Finish the active gesture, committing any shape preview.
    pub fn end_gesture(&mut self) {
        if let Some(DrawGesture::Shape { .. }) = self.gesture {
            if let Some(shape) = self.current_shape() {
                debug!(?shape, "Committing annotation shape");
            }
            self.committed.merge(&self.preview);
            self.preview.clear();
        }
        self.gesture = None;
    }

    /// Drop the active gesture without committing its preview.
    pub fn cancel_gesture(&mut self) {
        if let Some(DrawGesture::Shape { .. }) = self.gesture {
            self.preview.clear();
        }
        self.gesture = None;
    }

    /// Shape currently being previewed, if any.
    pub fn current_shape(&self) -> Option<Shape> {
        match self.gesture {
            Some(DrawGesture::Shape {
                tool,
                start,
                current: Some(current),
            }) => match tool {
                Tool::Circle => Some(Shape::circle(start, current)),
                Tool::Arrow => Some(Shape::arrow(start, current, self.head)),
                Tool::None | Tool::Pen => None,
            },
            _ => None,
        }
    }

    fn redraw_preview(&mut self) {
        self.preview.clear();
        if let Some(shape) = self.current_shape() {
            shape.draw(&mut self.preview, &self.style);
        }
    }

    /// Erase all committed ink and any preview, abandoning the active gesture.
    pub fn clear(&mut self) {
        self.committed.clear();
        self.preview.clear();
        self.gesture = None;
    }

    pub fn committed(&self) -> &InkLayer {
        &self.committed
    }

    pub fn preview(&self) -> &InkLayer {
        &self.preview
    }

    /// What the user currently sees: preview over committed ink.
    pub fn composite(&self) -> RgbaImage {
        let mut out = self.committed.clone();
        if matches!(self.gesture, Some(DrawGesture::Shape { .. })) {
            out.merge(&self.preview);
        }
        out.image().clone()
    }
}
