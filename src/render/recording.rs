use crate::assets::color::Color;
use crate::assets::decode::DecodedImage;
use crate::assets::fonts::{FixedAdvanceMeasurer, FontSpec, TextMeasurer};
use crate::foundation::core::{BezPath, Canvas, Point, Rect};
use crate::render::gradient::Fill;
use crate::render::surface::{DropShadow, StrokeStyle, Surface};

/// One recorded [`Surface`] call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// [`Surface::clear`].
    Clear(Color),
    /// [`Surface::set_shadow`].
    SetShadow(Option<DropShadow>),
    /// [`Surface::fill_path`].
    FillPath {
        /// Filled path.
        path: BezPath,
        /// Paint.
        fill: Fill,
    },
    /// [`Surface::stroke_path`].
    StrokePath {
        /// Stroked path.
        path: BezPath,
        /// Stroke parameters.
        style: StrokeStyle,
        /// Stroke color.
        color: Color,
    },
    /// [`Surface::erase_path`].
    ErasePath {
        /// Erased area.
        path: BezPath,
    },
    /// [`Surface::draw_image`].
    DrawImage {
        /// Source size in pixels.
        source_size: (u32, u32),
        /// Destination rectangle.
        dest: Rect,
    },
    /// [`Surface::fill_text`].
    FillText {
        /// Font.
        font: FontSpec,
        /// Text.
        text: String,
        /// Baseline-left origin.
        origin: Point,
        /// Fill color.
        color: Color,
    },
    /// [`Surface::stroke_text`].
    StrokeText {
        /// Font.
        font: FontSpec,
        /// Text.
        text: String,
        /// Baseline-left origin.
        origin: Point,
        /// Stroke parameters.
        style: StrokeStyle,
        /// Stroke color.
        color: Color,
    },
}

/// [`Surface`] that records calls instead of painting.
///
/// Text is measured by the wrapped [`TextMeasurer`], so layouts are deterministic without font
/// files.
#[derive(Clone, Debug)]
pub struct RecordingSurface<M = FixedAdvanceMeasurer> {
    size: Canvas,
    measurer: M,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface<FixedAdvanceMeasurer> {
    /// Recorder measuring text with [`FixedAdvanceMeasurer::default`].
    pub fn new(size: Canvas) -> Self {
        Self::with_measurer(size, FixedAdvanceMeasurer::default())
    }
}

impl<M: TextMeasurer> RecordingSurface<M> {
    /// Recorder with a custom measurer.
    pub fn with_measurer(size: Canvas, measurer: M) -> Self {
        Self {
            size,
            measurer,
            commands: Vec::new(),
        }
    }

    /// Calls recorded so far.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded calls, leaving the recorder empty.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl<M: TextMeasurer> TextMeasurer for RecordingSurface<M> {
    fn measure(&mut self, font: &FontSpec, text: &str) -> Option<f64> {
        self.measurer.measure(font, text)
    }
}

impl<M: TextMeasurer> Surface for RecordingSurface<M> {
    fn size(&self) -> Canvas {
        self.size
    }

    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn set_shadow(&mut self, shadow: Option<DropShadow>) {
        self.commands.push(DrawCommand::SetShadow(shadow));
    }

    fn fill_path(&mut self, path: &BezPath, fill: &Fill) {
        self.commands.push(DrawCommand::FillPath {
            path: path.clone(),
            fill: fill.clone(),
        });
    }

    fn stroke_path(&mut self, path: &BezPath, style: &StrokeStyle, color: Color) {
        self.commands.push(DrawCommand::StrokePath {
            path: path.clone(),
            style: style.clone(),
            color,
        });
    }

    fn erase_path(&mut self, path: &BezPath) {
        self.commands
            .push(DrawCommand::ErasePath { path: path.clone() });
    }

    fn draw_image(&mut self, image: &DecodedImage, dest: Rect) {
        self.commands.push(DrawCommand::DrawImage {
            source_size: (image.width, image.height),
            dest,
        });
    }

    fn fill_text(&mut self, font: &FontSpec, text: &str, origin: Point, color: Color) {
        self.commands.push(DrawCommand::FillText {
            font: font.clone(),
            text: text.to_owned(),
            origin,
            color,
        });
    }

    fn stroke_text(
        &mut self,
        font: &FontSpec,
        text: &str,
        origin: Point,
        style: &StrokeStyle,
        color: Color,
    ) {
        self.commands.push(DrawCommand::StrokeText {
            font: font.clone(),
            text: text.to_owned(),
            origin,
            style: style.clone(),
            color,
        });
    }
}
