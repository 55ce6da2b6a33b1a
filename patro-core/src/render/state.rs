//! Last-rendered display state
//!
//! Single source of truth for what is currently on screen. `None` means a
//! field was never rendered, which no legal value can equal, so the first
//! frame redraws everything.

use super::layout::Field;

/// Value of every tracked field as last drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayState {
    counter: Option<u64>,
    red: Option<u8>,
    green: Option<u8>,
    blue: Option<u8>,
    clients: Option<u32>,
}

impl DisplayState {
    /// State before anything was drawn
    pub const fn new() -> Self {
        Self {
            counter: None,
            red: None,
            green: None,
            blue: None,
            clients: None,
        }
    }

    pub fn counter(&self) -> Option<u64> {
        self.counter
    }

    pub fn red(&self) -> Option<u8> {
        self.red
    }

    pub fn green(&self) -> Option<u8> {
        self.green
    }

    pub fn blue(&self) -> Option<u8> {
        self.blue
    }

    pub fn clients(&self) -> Option<u32> {
        self.clients
    }

    /// Value of a field, widened to u64
    pub fn get(&self, field: Field) -> Option<u64> {
        match field {
            Field::Counter => self.counter,
            Field::Red => self.red.map(u64::from),
            Field::Green => self.green.map(u64::from),
            Field::Blue => self.blue.map(u64::from),
            Field::Clients => self.clients.map(u64::from),
        }
    }

    /// Whether every field has been drawn at least once
    pub fn is_complete(&self) -> bool {
        Field::ALL.iter().all(|f| self.get(*f).is_some())
    }

    /// Record a freshly drawn value
    ///
    /// Values come from the typed frame inputs, so narrowing cannot lose
    /// information.
    pub(crate) fn set(&mut self, field: Field, value: u64) {
        match field {
            Field::Counter => self.counter = Some(value),
            Field::Red => self.red = Some(value as u8),
            Field::Green => self.green = Some(value as u8),
            Field::Blue => self.blue = Some(value as u8),
            Field::Clients => self.clients = Some(value as u32),
        }
    }

    /// Forget everything, forcing a full redraw on the next frame
    pub(crate) fn invalidate(&mut self) {
        *self = Self::new();
    }
}
