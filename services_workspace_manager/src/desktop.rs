//! Virtual desktops
//!
//! A desktop is one terminal session: a name, a screen and a line of
//! pending input. The [`DesktopManager`] owns a bounded collection of them
//! with exactly one active at a time.

use console_serial::Screen;
use core_types::BoundedBytes;

/// Longest desktop name, in bytes
pub const MAX_NAME_LEN: usize = 16;
/// Longest shell input line, in bytes
pub const INPUT_BUFFER_LEN: usize = 32;
/// Number of desktops unless configured otherwise
pub const DEFAULT_DESKTOP_CAPACITY: usize = 2;
/// Largest desktop capacity a config may ask for
pub const MAX_DESKTOP_CAPACITY: usize = 64;

pub type DesktopName = BoundedBytes<MAX_NAME_LEN>;
pub type InputLine = BoundedBytes<INPUT_BUFFER_LEN>;

/// One virtual desktop
#[derive(Debug, Clone)]
pub struct Desktop {
    name: DesktopName,
    screen: Screen,
    input: InputLine,
    active: bool,
}

impl Desktop {
    /// Creates an initialized, active desktop
    pub fn new(name: &[u8]) -> Self {
        Self {
            name: DesktopName::from_truncated(name),
            screen: Screen::new(),
            input: InputLine::new(),
            active: true,
        }
    }

    pub fn name(&self) -> &DesktopName {
        &self.name
    }

    /// Renames the desktop, truncating to 16 bytes
    pub fn set_name(&mut self, name: &[u8]) {
        self.name.set(name);
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    pub fn input(&self) -> &InputLine {
        &self.input
    }

    /// Appends to the input line; dropped silently when full
    pub fn add_input(&mut self, byte: u8) {
        self.input.push(byte);
    }

    /// Removes the last input byte, if any
    pub fn remove_input(&mut self) {
        self.input.pop();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    /// Prints `[<name>]$ `
    pub fn show_prompt(&mut self) {
        self.screen.puts("[");
        self.screen.put_bytes(self.name.as_bytes());
        self.screen.puts("]$ ");
    }
}

/// Result of a successful forward switch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// A new desktop was created and activated
    Created,
    /// An existing desktop was activated
    Switched,
}

/// Owner of every desktop
#[derive(Debug, Clone)]
pub struct DesktopManager {
    desktops: Vec<Desktop>,
    capacity: usize,
    active_index: usize,
}

impl DesktopManager {
    /// Creates a manager with its first desktop already active
    ///
    /// A capacity of 0 is treated as 1. Desktops are allocated as they are
    /// created, never up front.
    pub fn new(capacity: usize, first_name: &[u8]) -> Self {
        Self {
            desktops: vec![Desktop::new(first_name)],
            capacity: capacity.max(1),
            active_index: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Index of the active desktop
    pub fn index(&self) -> usize {
        self.active_index
    }

    /// Number of desktops created so far
    pub fn count(&self) -> usize {
        self.desktops.iter().filter(|d| d.is_active()).count()
    }

    pub fn get(&self, index: usize) -> Option<&Desktop> {
        self.desktops.get(index)
    }

    pub fn current(&self) -> Option<&Desktop> {
        self.desktops
            .get(self.active_index)
            .filter(|d| d.is_active())
    }

    pub fn current_mut(&mut self) -> Option<&mut Desktop> {
        self.desktops
            .get_mut(self.active_index)
            .filter(|d| d.is_active())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Desktop> {
        self.desktops.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Desktop> {
        self.desktops.iter_mut()
    }

    /// Moves to the next desktop, creating it on first use
    ///
    /// Fails when the active desktop is the last slot under the capacity.
    pub fn next(&mut self) -> Option<SwitchOutcome> {
        let target = self.active_index + 1;
        if target >= self.capacity {
            return None;
        }

        let outcome = if target < self.desktops.len() {
            SwitchOutcome::Switched
        } else {
            let name = format!("Desktop {}", target + 1);
            self.desktops.push(Desktop::new(name.as_bytes()));
            SwitchOutcome::Created
        };
        self.active_index = target;
        Some(outcome)
    }

    /// Moves to the previous desktop
    pub fn previous(&mut self) -> bool {
        if self.active_index > 0 {
            self.active_index -= 1;
            true
        } else {
            false
        }
    }
}

impl Default for DesktopManager {
    fn default() -> Self {
        Self::new(DEFAULT_DESKTOP_CAPACITY, b"Desktop 1")
    }
}
