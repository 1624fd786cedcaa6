//! Rectangle selection over a scaled image.
//!
//! The host renders the image downscaled to a canvas of `width` x `height`;
//! `scale` maps canvas pixels back to source pixels. Selections are made in
//! canvas space and reported in source space.

use framelink_common::FramelinkError;
use serde::{Deserialize, Serialize};

/// A rectangle in source-image pixels, as exchanged with the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// A rectangle in canvas pixels. `w` and `h` may be negative while dragging
/// up or left; `normalized` fixes that.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl CanvasRect {
    pub fn normalized(self) -> Self {
        let (x, w) = if self.w < 0.0 {
            (self.x + self.w, -self.w)
        } else {
            (self.x, self.w)
        };
        let (y, h) = if self.h < 0.0 {
            (self.y + self.h, -self.h)
        } else {
            (self.y, self.h)
        };
        Self { x, y, w, h }
    }
}

impl std::str::FromStr for CanvasRect {
    type Err = String;

    /// Parses `x,y,w,h`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<f64> = s
            .split(',')
            .map(|p| p.trim().parse::<f64>().map_err(|e| format!("{p:?}: {e}")))
            .collect::<Result<_, _>>()?;
        match parts.as_slice() {
            [x, y, w, h] => Ok(Self {
                x: *x,
                y: *y,
                w: *w,
                h: *h,
            }),
            _ => Err(format!("expected x,y,w,h, got {} values", parts.len())),
        }
    }
}

/// Render arguments sent by the host.
#[derive(Debug, Clone, Deserialize)]
pub struct RectSelectorArgs {
    pub image_base64: String,
    pub width: u32,
    pub height: u32,
    pub scale: f64,
    #[serde(default)]
    pub can_go_back: bool,
    #[serde(default)]
    pub initial_rect: Option<Rect>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Confirm,
    Skip,
    Back,
}

/// The component value reported to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub action: Action,
    pub rect: Option<Rect>,
}

pub struct RectSelector {
    args: Option<RectSelectorArgs>,
    selection: Option<CanvasRect>,
    controls_height: u32,
    fallback_height: u32,
}

impl RectSelector {
    pub fn new(controls_height: u32, fallback_height: u32) -> Self {
        Self {
            args: None,
            selection: None,
            controls_height,
            fallback_height,
        }
    }

    /// Adopt new render arguments. The selection resets to `initial_rect`.
    pub fn render(&mut self, args: RectSelectorArgs) -> Result<(), FramelinkError> {
        if !(args.scale.is_finite() && args.scale > 0.0) {
            return Err(FramelinkError::Protocol(format!(
                "scale must be positive, got {}",
                args.scale
            )));
        }
        if args.width == 0 || args.height == 0 {
            return Err(FramelinkError::Protocol(format!(
                "empty canvas {}x{}",
                args.width, args.height
            )));
        }

        let scale = args.scale;
        self.selection = args.initial_rect.map(|r| CanvasRect {
            x: f64::from(r.x) / scale,
            y: f64::from(r.y) / scale,
            w: f64::from(r.w) / scale,
            h: f64::from(r.h) / scale,
        });
        self.args = Some(args);
        Ok(())
    }

    /// Rendered height: canvas plus controls, or the fallback before the
    /// first render.
    pub fn content_height(&self) -> f64 {
        match &self.args {
            Some(args) => f64::from(args.height) + f64::from(self.controls_height),
            None => f64::from(self.fallback_height),
        }
    }

    /// Set the selection, clamped to the canvas. A selection with no area
    /// clears it.
    pub fn select(&mut self, rect: CanvasRect) -> Option<CanvasRect> {
        let args = self.args.as_ref()?;
        let (cw, ch) = (f64::from(args.width), f64::from(args.height));
        let r = rect.normalized();

        let x0 = r.x.clamp(0.0, cw);
        let y0 = r.y.clamp(0.0, ch);
        let x1 = (r.x + r.w).clamp(0.0, cw);
        let y1 = (r.y + r.h).clamp(0.0, ch);

        self.selection = if x1 - x0 >= 1.0 && y1 - y0 >= 1.0 {
            Some(CanvasRect {
                x: x0,
                y: y0,
                w: x1 - x0,
                h: y1 - y0,
            })
        } else {
            None
        };
        self.selection
    }

    pub fn selection(&self) -> Option<CanvasRect> {
        self.selection
    }

    /// Selection mapped to source-image pixels.
    pub fn selection_in_source(&self) -> Option<Rect> {
        let args = self.args.as_ref()?;
        let sel = self.selection?;
        let to_source = |v: f64| (v * args.scale).round().max(0.0) as u32;
        Some(Rect {
            x: to_source(sel.x),
            y: to_source(sel.y),
            w: to_source(sel.w),
            h: to_source(sel.h),
        })
    }

    /// The value an action produces, or `None` if the action is not
    /// available: nothing rendered, confirm without a selection, or back
    /// when the host disallows it.
    pub fn act(&self, action: Action) -> Option<Selection> {
        let args = self.args.as_ref()?;
        let rect = match action {
            Action::Confirm => Some(self.selection_in_source()?),
            Action::Skip => None,
            Action::Back if args.can_go_back => None,
            Action::Back => return None,
        };
        Some(Selection { action, rect })
    }
}
