//! Document description model and the fluent [`DocumentBuilder`].

/// Horizontal alignment of a paragraph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
    Justify,
}

/// Form field kind understood by the service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Checkbox,
    Signature,
}

/// Styled text block.
#[derive(Clone, Debug, PartialEq)]
pub struct Paragraph {
    pub text: String,
    /// Font size in points. `None` uses the service default.
    pub font_size: Option<f64>,
    pub align: Option<Align>,
}

impl Paragraph {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_size: None,
            align: None,
        }
    }

    pub fn font_size(mut self, points: f64) -> Self {
        self.font_size = Some(points);
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }
}

/// Placement of a previously uploaded asset.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    pub asset_id: String,
    /// Rendered width in points.
    pub width: f64,
    /// Rendered height in points.
    pub height: f64,
}

impl Image {
    pub fn new(asset_id: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            asset_id: asset_id.into(),
            width,
            height,
        }
    }
}

/// Stroked vector path in page coordinates (points).
#[derive(Clone, Debug, PartialEq)]
pub struct PathShape {
    pub points: Vec<(f64, f64)>,
    pub stroke_width: f64,
    /// Connect the last point back to the first.
    pub close: bool,
}

impl PathShape {
    pub fn new(points: impl Into<Vec<(f64, f64)>>) -> Self {
        Self {
            points: points.into(),
            stroke_width: 1.0,
            close: false,
        }
    }

    pub fn stroke_width(mut self, points: f64) -> Self {
        self.stroke_width = points;
        self
    }

    pub fn closed(mut self) -> Self {
        self.close = true;
        self
    }
}

/// Interactive form field.
#[derive(Clone, Debug, PartialEq)]
pub struct FormField {
    pub name: String,
    pub kind: FieldKind,
    pub value: Option<String>,
}

impl FormField {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Text,
            value: Some(value.into()),
        }
    }

    pub fn checkbox(name: impl Into<String>, checked: bool) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Checkbox,
            value: Some(checked.to_string()),
        }
    }

    pub fn signature(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Signature,
            value: None,
        }
    }
}

/// Single element of a document build request.
#[derive(Clone, Debug, PartialEq)]
pub enum Part {
    Paragraph(Paragraph),
    Image(Image),
    Path(PathShape),
    Field(FormField),
}

impl From<Paragraph> for Part {
    fn from(paragraph: Paragraph) -> Self {
        Part::Paragraph(paragraph)
    }
}

impl From<Image> for Part {
    fn from(image: Image) -> Self {
        Part::Image(image)
    }
}

impl From<PathShape> for Part {
    fn from(path: PathShape) -> Self {
        Part::Path(path)
    }
}

impl From<FormField> for Part {
    fn from(field: FormField) -> Self {
        Part::Field(field)
    }
}

/// Ordered description of a document to build.
///
/// ```no_run
/// use docmill_http::{Align, DocumentBuilder, FormField, Paragraph};
///
/// let document = DocumentBuilder::new("Quarterly report")
///     .part(Paragraph::new("Q3 summary").font_size(18.0).align(Align::Center))
///     .part(Paragraph::new("Revenue grew by 14%."))
///     .part(FormField::signature("approved_by"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentBuilder {
    pub title: String,
    pub parts: Vec<Part>,
}

impl DocumentBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            parts: Vec::new(),
        }
    }

    /// Appends any part; the typed helpers below delegate here.
    pub fn part(mut self, part: impl Into<Part>) -> Self {
        self.parts.push(part.into());
        self
    }

    pub fn paragraph(self, paragraph: Paragraph) -> Self {
        self.part(paragraph)
    }

    pub fn image(self, image: Image) -> Self {
        self.part(image)
    }

    pub fn path(self, path: PathShape) -> Self {
        self.part(path)
    }

    pub fn field(self, field: FormField) -> Self {
        self.part(field)
    }
}
