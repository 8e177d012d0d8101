use serde::{Deserialize, Serialize};

use crate::assets::fonts::TextMeasurer;
use crate::foundation::core::{Point, Rect};
use crate::geometry::hit::{ResizeHandle, handle_at, point_in_rect};
use crate::geometry::resize::resize_keep_aspect;
use crate::interact::pointer::NudgeKey;
use crate::scene::model::{Layer, Scene};

/// Options for hit-testing and gesture math.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionOpts {
    pub(crate) handle_size: f64,
    pub(crate) handle_offset: f64,
    pub(crate) min_size: f64,
    pub(crate) nudge_step: f64,
    pub(crate) nudge_step_fast: f64,
}

impl Default for InteractionOpts {
    fn default() -> Self {
        Self {
            handle_size: 8.0,
            handle_offset: 4.0,
            min_size: 20.0,
            nudge_step: 1.0,
            nudge_step_fast: 10.0,
        }
    }
}

impl InteractionOpts {
    /// Handle square side and its offset up-left of the corner.
    pub fn with_handle(mut self, size: f64, offset: f64) -> Self {
        self.handle_size = size;
        self.handle_offset = offset;
        self
    }

    /// Smallest width a resize may produce.
    pub fn with_min_size(mut self, min_size: f64) -> Self {
        self.min_size = min_size;
        self
    }

    /// Arrow-key step without and with shift.
    pub fn with_nudge_steps(mut self, step: f64, fast: f64) -> Self {
        self.nudge_step = step;
        self.nudge_step_fast = fast;
        self
    }
}

/// Outcome of a pointer-down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum HitResult {
    /// Select (and start dragging) a layer.
    Select {
        /// Hit layer.
        layer_id: String,
    },
    /// Start resizing the selected image layer.
    Resize {
        /// Resized layer.
        layer_id: String,
        /// Grabbed handle.
        handle: ResizeHandle,
    },
    /// Nothing was hit.
    Deselect,
}

impl HitResult {
    /// Layer the result refers to.
    pub fn layer_id(&self) -> Option<&str> {
        match self {
            HitResult::Select { layer_id } | HitResult::Resize { layer_id, .. } => Some(layer_id),
            HitResult::Deselect => None,
        }
    }
}

/// Geometry change the host should write back into its scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum Proposal {
    /// New anchor point.
    Move {
        /// Moved layer.
        layer_id: String,
        /// New x.
        x: f64,
        /// New y.
        y: f64,
    },
    /// New image rectangle.
    Resize {
        /// Resized layer.
        layer_id: String,
        /// New bounds.
        rect: Rect,
    },
}

impl Proposal {
    /// Layer the proposal applies to.
    pub fn layer_id(&self) -> &str {
        match self {
            Proposal::Move { layer_id, .. } | Proposal::Resize { layer_id, .. } => layer_id,
        }
    }
}

/// Controller state, as reported by [`Controller::mode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionMode {
    /// No gesture in progress.
    Idle,
    /// Moving a layer.
    Dragging,
    /// Resizing an image layer.
    Resizing,
}

#[derive(Debug, Clone, PartialEq)]
enum Gesture {
    Idle,
    Dragging {
        layer_id: String,
        start: Point,
        origin: Point,
    },
    Resizing {
        layer_id: String,
        handle: ResizeHandle,
        start: Point,
        rect: Rect,
    },
}

/// Pointer/keyboard state machine. It never mutates the scene; every change is proposed.
#[derive(Debug, Clone, PartialEq)]
pub struct Controller {
    gesture: Gesture,
    opts: InteractionOpts,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(InteractionOpts::default())
    }
}

impl Controller {
    /// Idle controller.
    pub fn new(opts: InteractionOpts) -> Self {
        Self {
            gesture: Gesture::Idle,
            opts,
        }
    }

    /// Current state.
    pub fn mode(&self) -> InteractionMode {
        match self.gesture {
            Gesture::Idle => InteractionMode::Idle,
            Gesture::Dragging { .. } => InteractionMode::Dragging,
            Gesture::Resizing { .. } => InteractionMode::Resizing,
        }
    }

    /// Hit-test `pos` and start a drag or resize gesture on a hit.
    pub fn pointer_down<M: TextMeasurer + ?Sized>(
        &mut self,
        pos: Point,
        scene: &Scene,
        measurer: &mut M,
    ) -> HitResult {
        let hit = hit_test(pos, scene, measurer, &self.opts);
        self.gesture = match &hit {
            HitResult::Select { layer_id } => match scene.layer(layer_id) {
                Some(layer) => Gesture::Dragging {
                    layer_id: layer_id.clone(),
                    start: pos,
                    origin: layer.position(),
                },
                None => Gesture::Idle,
            },
            HitResult::Resize { layer_id, handle } => match scene.layer(layer_id) {
                Some(Layer::Image(img)) => Gesture::Resizing {
                    layer_id: layer_id.clone(),
                    handle: *handle,
                    start: pos,
                    rect: img.rect(),
                },
                _ => Gesture::Idle,
            },
            HitResult::Deselect => Gesture::Idle,
        };
        hit
    }

    /// Geometry for the gesture in progress, or `None` when idle or the layer is gone.
    pub fn pointer_move(&self, pos: Point, scene: &Scene) -> Option<Proposal> {
        match &self.gesture {
            Gesture::Idle => None,
            Gesture::Dragging {
                layer_id,
                start,
                origin,
            } => {
                scene.layer(layer_id)?;
                let d = pos - *start;
                Some(Proposal::Move {
                    layer_id: layer_id.clone(),
                    x: origin.x + d.x,
                    y: origin.y + d.y,
                })
            }
            Gesture::Resizing {
                layer_id,
                handle,
                start,
                rect,
            } => {
                let Some(Layer::Image(_)) = scene.layer(layer_id) else {
                    return None;
                };
                Some(Proposal::Resize {
                    layer_id: layer_id.clone(),
                    rect: resize_keep_aspect(*rect, *handle, pos - *start, self.opts.min_size),
                })
            }
        }
    }

    /// End the gesture.
    pub fn pointer_up(&mut self) {
        self.gesture = Gesture::Idle;
    }

    /// End the gesture; same as [`Controller::pointer_up`].
    pub fn pointer_leave(&mut self) {
        self.pointer_up();
    }

    /// Move the selected layer by one arrow-key step (`shift` for the fast step).
    ///
    /// Ignored while a pointer gesture is in progress or nothing is selected.
    pub fn key_nudge(&self, key: NudgeKey, shift: bool, scene: &Scene) -> Option<Proposal> {
        if self.gesture != Gesture::Idle {
            return None;
        }
        let layer = scene.selected_layer()?;
        let step = if shift {
            self.opts.nudge_step_fast
        } else {
            self.opts.nudge_step
        };
        let p = layer.position() + key.delta(step);
        Some(Proposal::Move {
            layer_id: layer.id().to_owned(),
            x: p.x,
            y: p.y,
        })
    }
}

/// Stateless hit-test, topmost layer first.
///
/// For each layer from the top: the selected image layer's handles are checked before its
/// bounds. Text bounds need `measurer`; an unmeasurable text layer is never hit.
#[tracing::instrument(level = "trace", skip(scene, measurer, opts), ret)]
pub fn hit_test<M: TextMeasurer + ?Sized>(
    pos: Point,
    scene: &Scene,
    measurer: &mut M,
    opts: &InteractionOpts,
) -> HitResult {
    for layer in scene.layers.iter().rev() {
        if let Layer::Image(img) = layer
            && scene.is_selected(&img.id)
            && let Some(handle) = handle_at(pos, img.rect(), opts.handle_size, opts.handle_offset)
        {
            return HitResult::Resize {
                layer_id: img.id.clone(),
                handle,
            };
        }

        let bounds = match layer {
            Layer::Image(img) => Some(img.rect()),
            Layer::Text(t) => measurer
                .measure(&t.font(), &t.text)
                .map(|w| t.bounds_for_width(w)),
        };
        if bounds.is_some_and(|b| point_in_rect(pos, b)) {
            return HitResult::Select {
                layer_id: layer.id().to_owned(),
            };
        }
    }
    HitResult::Deselect
}

impl Scene {
    /// Write a controller proposal back; returns `false` when the layer is missing or the
    /// proposal does not fit its kind.
    pub fn apply(&mut self, proposal: &Proposal) -> bool {
        let Some(layer) = self.layer_mut(proposal.layer_id()) else {
            return false;
        };
        match (proposal, layer) {
            (Proposal::Move { x, y, .. }, layer) => {
                layer.set_position(Point::new(*x, *y));
                true
            }
            (Proposal::Resize { rect, .. }, Layer::Image(img)) => {
                img.x = rect.x0;
                img.y = rect.y0;
                img.width = rect.width();
                img.height = rect.height();
                true
            }
            (Proposal::Resize { .. }, Layer::Text(_)) => false,
        }
    }

    /// Update the selection from a hit result.
    pub fn apply_hit(&mut self, hit: &HitResult) {
        match hit {
            HitResult::Select { layer_id } => self.selected_layer_id = Some(layer_id.clone()),
            HitResult::Resize { .. } => {}
            HitResult::Deselect => self.selected_layer_id = None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interact/controller.rs"]
mod tests;
