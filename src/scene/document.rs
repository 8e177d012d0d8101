use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::foundation::error::{FramecutError, FramecutResult};
use crate::scene::model::{GradientSpec, Layer, Scene};

#[derive(Debug, Clone, PartialEq, Eq)]
enum PathElem {
    Field(&'static str),
    Index(usize),
}

#[derive(Debug, Clone)]
struct SceneIssue {
    path: Vec<PathElem>,
    message: String,
}

impl SceneIssue {
    fn at(path: &[PathElem], message: impl Into<String>) -> Self {
        Self {
            path: path.to_vec(),
            message: message.into(),
        }
    }
}

impl fmt::Display for SceneIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = String::from("$");
        for p in &self.path {
            match *p {
                PathElem::Field(name) => {
                    s.push('.');
                    s.push_str(name);
                }
                PathElem::Index(i) => {
                    s.push('[');
                    s.push_str(&i.to_string());
                    s.push(']');
                }
            }
        }
        write!(f, "{s}: {}", self.message)
    }
}

impl Scene {
    /// Parse a scene from a JSON reader. The result is not validated.
    pub fn from_reader<R: std::io::Read>(r: R) -> FramecutResult<Self> {
        serde_json::from_reader(r).map_err(|e| FramecutError::serde(format!("parse scene JSON: {e}")))
    }

    /// Parse a scene from a JSON string. The result is not validated.
    pub fn from_json_str(s: &str) -> FramecutResult<Self> {
        serde_json::from_str(s).map_err(|e| FramecutError::serde(format!("parse scene JSON: {e}")))
    }

    /// Parse and validate a scene JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> FramecutResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            FramecutError::validation(format!("open scene JSON '{}': {e}", path.display()))
        })?;
        let scene = Self::from_reader(BufReader::new(f))?;
        scene.validate()?;
        Ok(scene)
    }

    /// Pretty JSON in the editor's camelCase shape.
    pub fn to_json_pretty(&self) -> FramecutResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| FramecutError::serde(format!("serialize scene JSON: {e}")))
    }

    /// Write pretty JSON to `path`.
    pub fn write_path(&self, path: impl AsRef<Path>) -> FramecutResult<()> {
        let path = path.as_ref();
        let f = File::create(path).map_err(|e| {
            FramecutError::validation(format!("create scene JSON '{}': {e}", path.display()))
        })?;
        let mut w = BufWriter::new(f);
        serde_json::to_writer_pretty(&mut w, self)
            .map_err(|e| FramecutError::serde(format!("serialize scene JSON: {e}")))?;
        w.flush()
            .map_err(|e| FramecutError::validation(format!("write '{}': {e}", path.display())))?;
        Ok(())
    }

    /// Check the document-level invariants and report every violation at once.
    ///
    /// Geometric degeneracies (a non-positive usable cutout width, an oversized radius) are not
    /// rejected; the renderer draws whatever falls out of them.
    pub fn validate(&self) -> FramecutResult<()> {
        let mut issues = Vec::new();

        if self.screen_width == 0 || self.screen_height == 0 {
            issues.push(SceneIssue::at(&[], "screenWidth and screenHeight must be > 0"));
        }

        validate_gradient(
            &self.background,
            &[PathElem::Field("background")],
            &mut issues,
        );

        let frame = &self.frame;
        let fpath = [PathElem::Field("frame")];
        for (name, v) in [
            ("leftWidth", frame.left_width),
            ("rightWidth", frame.right_width),
            ("topWidth", frame.top_width),
            ("bottomWidth", frame.bottom_width),
            ("radius", frame.radius),
            ("innerBorderWidth", frame.inner_border_width),
        ] {
            if !v.is_finite() || v < 0.0 {
                issues.push(SceneIssue::at(&fpath, format!("{name} must be finite and >= 0")));
            }
        }
        if !frame.spacing.is_finite() || frame.spacing < 1.0 {
            issues.push(SceneIssue::at(&fpath, "spacing must be >= 1"));
        }

        let mut ids = HashSet::<&str>::new();
        for (i, layer) in self.layers.iter().enumerate() {
            let path = [PathElem::Field("layers"), PathElem::Index(i)];
            if layer.id().is_empty() {
                issues.push(SceneIssue::at(&path, "id must be non-empty"));
            } else if !ids.insert(layer.id()) {
                issues.push(SceneIssue::at(
                    &path,
                    format!("duplicate layer id '{}'", layer.id()),
                ));
            }
            validate_layer(layer, &path, &mut issues);
        }

        if let Some(sel) = self.selected_layer_id.as_deref()
            && !ids.contains(sel)
        {
            issues.push(SceneIssue::at(
                &[PathElem::Field("selectedLayerId")],
                format!("references unknown layer '{sel}'"),
            ));
        }

        if issues.is_empty() {
            return Ok(());
        }
        let msg = issues
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        Err(FramecutError::validation(format!("scene validation failed: {msg}")))
    }
}

fn validate_gradient(spec: &GradientSpec, path: &[PathElem], issues: &mut Vec<SceneIssue>) {
    if spec.stops.is_empty() {
        issues.push(SceneIssue::at(path, "gradient needs at least one stop"));
    }
    for (i, stop) in spec.stops.iter().enumerate() {
        if !(0.0..=1.0).contains(&stop.offset) {
            let mut p = path.to_vec();
            p.extend([PathElem::Field("stops"), PathElem::Index(i)]);
            issues.push(SceneIssue::at(&p, "offset must be in [0, 1]"));
        }
    }
}

fn validate_layer(layer: &Layer, path: &[PathElem], issues: &mut Vec<SceneIssue>) {
    let pos = layer.position();
    if !pos.x.is_finite() || !pos.y.is_finite() {
        issues.push(SceneIssue::at(path, "x and y must be finite"));
    }
    match layer {
        Layer::Text(t) => {
            if !(1.0..=200.0).contains(&t.font_size) {
                issues.push(SceneIssue::at(path, "fontSize must be in [1, 200]"));
            }
            if t.font_family.trim().is_empty() {
                issues.push(SceneIssue::at(path, "fontFamily must be non-empty"));
            }
            let shadow = &t.effects.shadow;
            if !shadow.blur.is_finite() || shadow.blur < 0.0 {
                issues.push(SceneIssue::at(path, "effects.shadow.blur must be >= 0"));
            }
            if !(shadow.offset_x.is_finite() && shadow.offset_y.is_finite()) {
                issues.push(SceneIssue::at(path, "effects.shadow offsets must be finite"));
            }
            if !t.effects.outline.width.is_finite() || t.effects.outline.width < 1.0 {
                issues.push(SceneIssue::at(path, "effects.outline.width must be >= 1"));
            }
        }
        Layer::Image(img) => {
            if !(img.width.is_finite() && img.width > 0.0)
                || !(img.height.is_finite() && img.height > 0.0)
            {
                issues.push(SceneIssue::at(path, "width and height must be > 0"));
            }
            if img.url.is_empty() {
                issues.push(SceneIssue::at(path, "url must be non-empty"));
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/document.rs"]
mod tests;
