#![forbid(unsafe_code)]

//! JSON scenario fixtures.
//!
//! A scenario describes a surface, the elements on it, optional per-element
//! drag options, a pointer script, and the positions expected afterwards:
//!
//! ```json
//! {
//!   "surface": { "width": 400, "height": 300 },
//!   "elements": [
//!     { "name": "knob", "rect": [20, 20, 50, 50],
//!       "options": { "snap": 10, "max_x": 200, "max_y": 200 } }
//!   ],
//!   "steps": [
//!     { "down": { "x": 30, "y": 30, "target": "knob" } },
//!     { "move": { "x": 235, "y": 50 } },
//!     { "up": { "x": 235, "y": 50 } }
//!   ],
//!   "expect": { "knob": [150, 40] }
//! }
//! ```
//!
//! Elements carry the default marker unless `classes` says otherwise.
//! Elements without `options` are not registered up front and rely on lazy
//! registration at their first pointer-down.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use dragdrop_core::config::DEFAULT_MARKER;
use dragdrop_core::{
    ControllerConfig, DragError, DragOptions, DragTransition, Point, PointerEvent, Rect, Size,
};

use crate::harness::Harness;
use crate::surface::{HeadlessSurface, LayoutMode};

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("drag error: {0}")]
    Drag(#[from] DragError),

    #[error("step {step} targets unknown element: {name}")]
    UnknownTarget { step: usize, name: String },

    #[error("expected element not found: {name}")]
    MissingElement { name: String },

    #[error(
        "{}: expected ({}, {}), got ({}, {})",
        .name, .expected.x, .expected.y, .actual.x, .actual.y
    )]
    Mismatch {
        name: String,
        expected: Point,
        actual: Point,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SurfaceSpec {
    pub width: i32,
    pub height: i32,
    /// Client viewport; defaults to the scroll size.
    #[serde(default)]
    pub client: Option<[i32; 2]>,
    #[serde(default)]
    pub deferred_layout: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ElementSpec {
    pub name: String,
    #[serde(default = "default_classes")]
    pub classes: String,
    /// `[x, y, width, height]`.
    pub rect: [i32; 4],
    #[serde(default)]
    pub options: Option<DragOptions>,
}

fn default_classes() -> String {
    DEFAULT_MARKER.to_owned()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Down {
        x: i32,
        y: i32,
        #[serde(default)]
        target: Option<String>,
    },
    Move {
        x: i32,
        y: i32,
    },
    Up {
        x: i32,
        y: i32,
    },
    Cancel,
    FlushLayout,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Scenario {
    pub surface: SurfaceSpec,
    #[serde(default)]
    pub config: ControllerConfig,
    pub elements: Vec<ElementSpec>,
    pub steps: Vec<Step>,
    #[serde(default)]
    pub expect: BTreeMap<String, [i32; 2]>,
}

/// Result of replaying a scenario.
#[derive(Debug)]
pub struct Outcome {
    pub transitions: Vec<DragTransition>,
    pub positions: BTreeMap<String, Point>,
    pub harness: Harness,
}

impl Scenario {
    pub fn from_json(text: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Build the surface, register elements, and replay the steps.
    pub fn run(self) -> Result<Outcome, ScenarioError> {
        let scroll = Size::new(self.surface.width, self.surface.height);
        let client = self
            .surface
            .client
            .map_or(scroll, |[w, h]| Size::new(w, h));
        let layout = if self.surface.deferred_layout {
            LayoutMode::Deferred
        } else {
            LayoutMode::Immediate
        };
        let mut surface = HeadlessSurface::with_viewport(scroll, client).with_layout(layout);

        let mut ids = BTreeMap::new();
        let mut pending = Vec::new();
        for spec in self.elements {
            let [x, y, w, h] = spec.rect;
            let id = surface.spawn(Some(&spec.name), &spec.classes, Rect::new(x, y, w, h));
            ids.insert(spec.name.clone(), id);
            if let Some(options) = spec.options {
                pending.push((id, options));
            }
        }

        let mut harness = Harness::from_surface(surface, self.config);
        for (id, options) in pending {
            harness
                .controller
                .set(id, options, &mut harness.surface)?;
        }

        let mut transitions = Vec::with_capacity(self.steps.len());
        for (step, action) in self.steps.into_iter().enumerate() {
            let transition = match action {
                Step::Down { x, y, target: None } => harness.press_empty(x, y),
                Step::Down {
                    x,
                    y,
                    target: Some(name),
                } => {
                    let id = *ids
                        .get(&name)
                        .ok_or(ScenarioError::UnknownTarget { step, name })?;
                    harness.dispatch(PointerEvent::down(x, y, id))
                }
                Step::Move { x, y } => harness.move_to(x, y),
                Step::Up { x, y } => harness.release(x, y),
                Step::Cancel => harness.controller.cancel(),
                Step::FlushLayout => {
                    harness.surface.flush_layout();
                    DragTransition::Ignored
                }
            };
            tracing::trace!(step, ?transition, "scenario step");
            transitions.push(transition);
        }

        let positions = ids
            .iter()
            .filter_map(|(name, id)| harness.rect(*id).map(|r| (name.clone(), r.origin())))
            .collect();

        let outcome = Outcome {
            transitions,
            positions,
            harness,
        };
        outcome.verify(&self.expect)?;
        Ok(outcome)
    }
}

impl Outcome {
    /// Compare final positions against `expect`.
    pub fn verify(&self, expect: &BTreeMap<String, [i32; 2]>) -> Result<(), ScenarioError> {
        for (name, &[x, y]) in expect {
            let actual = *self
                .positions
                .get(name)
                .ok_or_else(|| ScenarioError::MissingElement { name: name.clone() })?;
            let expected = Point::new(x, y);
            if actual != expected {
                return Err(ScenarioError::Mismatch {
                    name: name.clone(),
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }
}
