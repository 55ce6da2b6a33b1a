//! Captive-portal request handling
//!
//! The firmware reads a request head off a TCP socket and hands it here.
//! Everything from the request line to the response head is decided in
//! this module, so it runs and is tested on the host.
//!
//! Routes:
//!
//! - `/` serves the control page
//! - `/set?red=R&green=G&blue=B` applies an override, then redirects to `/`
//! - anything else redirects to `/`, which makes OS connectivity probes land
//!   on the control page

pub mod http;
pub mod page;
pub mod peers;

pub use http::{query_param, Method, Request, RequestError, Response};
pub use page::INDEX_PAGE;
pub use peers::PeerTable;

use crate::arbiter::ModeArbiter;
use crate::color::ColorSample;

/// Path of the control page
pub const INDEX_PATH: &str = "/";

/// Path of the override endpoint
pub const SET_PATH: &str = "/set";

/// Resolved destination of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Route {
    Index,
    SetColor,
    Unknown,
}

/// Map a request path to its route
pub fn route(path: &str) -> Route {
    match path {
        INDEX_PATH => Route::Index,
        SET_PATH => Route::SetColor,
        _ => Route::Unknown,
    }
}

/// Parse `red`, `green` and `blue` out of a query string
///
/// Each value must be a decimal integer. Values outside 0-255 keep their
/// low eight bits. Returns `None` if any channel is missing or not an
/// integer.
pub fn parse_override(query: &str) -> Option<ColorSample> {
    let channel = |name: &str| -> Option<u8> {
        let value: i32 = query_param(query, name)?.parse().ok()?;
        Some(value as u8)
    };
    Some(ColorSample::new(
        channel("red")?,
        channel("green")?,
        channel("blue")?,
    ))
}

/// Result of handling one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Outcome {
    pub route: Route,
    /// Override written to the arbiter, if any
    pub applied: Option<ColorSample>,
    pub response: Response,
}

/// Request handler backed by the shared arbiter
#[derive(Debug, Clone, Copy)]
pub struct Portal<'a> {
    arbiter: &'a ModeArbiter,
}

impl<'a> Portal<'a> {
    pub const fn new(arbiter: &'a ModeArbiter) -> Self {
        Self { arbiter }
    }

    /// Handle a parsed request
    ///
    /// Never fails toward the client: bad parameters are ignored and the
    /// client is sent back to the control page.
    pub fn handle(&self, request: &Request<'_>) -> Outcome {
        let route = route(request.path);
        let (applied, response) = match route {
            Route::Index => (None, Response::Page(INDEX_PAGE)),
            Route::SetColor => {
                let applied = request.query.and_then(parse_override);
                if let Some(color) = applied {
                    self.arbiter
                        .apply_override(color.red, color.green, color.blue);
                }
                (applied, Response::Redirect(INDEX_PATH))
            }
            Route::Unknown => (None, Response::Redirect(INDEX_PATH)),
        };

        Outcome {
            route,
            applied,
            response,
        }
    }
}
