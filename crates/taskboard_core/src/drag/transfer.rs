//! Gesture transfer payload.

/// MIME type of the only payload this board produces or consumes.
pub const TEXT_PLAIN: &str = "text/plain";

/// Operation a gesture declares to the platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DropEffect {
    #[default]
    None,
    Copy,
    Move,
    Link,
}

/// MIME-typed entries attached to a gesture.
///
/// Entry order is declaration order; setting an existing format replaces
/// its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTransfer {
    entries: Vec<(String, String)>,
    pub effect_allowed: DropEffect,
}

impl DataTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_data(&mut self, format: &str, data: impl Into<String>) {
        let data = data.into();
        match self.entries.iter_mut().find(|(existing, _)| existing == format) {
            Some(entry) => entry.1 = data,
            None => self.entries.push((format.to_string(), data)),
        }
    }

    pub fn get_data(&self, format: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == format)
            .map(|(_, data)| data.as_str())
    }

    /// Declared formats in declaration order.
    pub fn types(&self) -> Vec<&str> {
        self.entries.iter().map(|(format, _)| format.as_str()).collect()
    }
}

/// One gesture event as seen by a source or target.
///
/// `prevent_default` is how a target claims the drop; without it the
/// platform refuses the drop and no `accept` is delivered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragEvent {
    transfer: DataTransfer,
    default_prevented: bool,
}

impl DragEvent {
    pub fn new(transfer: DataTransfer) -> Self {
        Self {
            transfer,
            default_prevented: false,
        }
    }

    pub fn transfer(&self) -> &DataTransfer {
        &self.transfer
    }

    pub fn transfer_mut(&mut self) -> &mut DataTransfer {
        &mut self.transfer
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub(crate) fn reset_default(&mut self) {
        self.default_prevented = false;
    }
}
