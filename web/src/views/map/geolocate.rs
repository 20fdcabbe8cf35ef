use leptos::prelude::{Callable, Callback};
use shared_types::Coordinate;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// How a position request was answered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DevicePosition {
    /// The browser reported the device position.
    Device(Coordinate),
    /// Geolocation was unsupported, denied, or failing; this is the
    /// caller-supplied fallback.
    Fallback(Coordinate),
}

impl DevicePosition {
    pub fn coordinate(self) -> Coordinate {
        match self {
            DevicePosition::Device(coord) | DevicePosition::Fallback(coord) => coord,
        }
    }

    pub fn is_fallback(self) -> bool {
        matches!(self, DevicePosition::Fallback(_))
    }
}

/// Resolves the device position, or the fallback when geolocation is
/// unsupported, denied, or failing. The callback always runs exactly once
/// and is told which case it got, so callers can surface a denial instead
/// of passing the fallback off as the real position; they guard against
/// staleness with their own generation token.
pub fn locate_or(fallback: Coordinate, on_resolved: Callback<DevicePosition>) {
    let Some(window) = web_sys::window() else {
        on_resolved.run(DevicePosition::Fallback(fallback));
        return;
    };
    let Ok(geolocation) = window.navigator().geolocation() else {
        leptos::logging::warn!("geolocation unsupported; using campus center");
        on_resolved.run(DevicePosition::Fallback(fallback));
        return;
    };

    let success = Closure::once(move |position: web_sys::Position| {
        let coords = position.coords();
        on_resolved.run(DevicePosition::Device(Coordinate::new(
            coords.latitude(),
            coords.longitude(),
        )));
    });
    let failure = Closure::once(move |err: web_sys::PositionError| {
        leptos::logging::warn!("geolocation denied or failed ({}); using campus center", err.code());
        on_resolved.run(DevicePosition::Fallback(fallback));
    });

    if geolocation
        .get_current_position_with_error_callback(
            success.as_ref().unchecked_ref(),
            Some(failure.as_ref().unchecked_ref()),
        )
        .is_err()
    {
        on_resolved.run(DevicePosition::Fallback(fallback));
        return;
    }

    // One-shot closures; the browser holds them until one fires.
    success.forget();
    failure.forget();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_keeps_its_coordinate_and_is_flagged() {
        let center = Coordinate::new(13.0290, 80.0189);
        assert_eq!(DevicePosition::Fallback(center).coordinate(), center);
        assert!(DevicePosition::Fallback(center).is_fallback());
        assert!(!DevicePosition::Device(center).is_fallback());
    }
}
