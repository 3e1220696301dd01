//! Single-gesture driver.
//!
//! # Responsibility
//! - Sequence source/target callbacks the way a pointer gesture delivers
//!   them.
//! - Enforce the per-gesture state machine.
//!
//! # Invariants
//! - `accept` is only delivered when the hovered target claimed the drop.
//! - At most one drop per gesture: after a committed or refused drop every
//!   further hover or drop is an error.
//! - At most one target is hovered; moving to another target, or ending the
//!   gesture mid-hover, delivers `reject` to the one being left.
//! - `release` is delivered exactly once, on `end`.

use crate::drag::protocol::{DragTarget, Draggable};
use crate::drag::transfer::{DataTransfer, DragEvent};
use crate::store::observable::StoreError;
use crate::store::work_item_store::TransitionOutcome;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Per-gesture protocol state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureState {
    Idle,
    Hovering { target_id: String },
    /// Terminal: the hovered target accepted the drop.
    Committed,
    /// Terminal: dropped where no target claimed it.
    Refused,
}

/// Result of a drop event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// Target accepted and requested the transition.
    Committed(TransitionOutcome),
    /// Target never claimed the drop; platform default applied.
    Refused,
}

/// Misuse of the gesture sequence, or a store failure during commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragError {
    AlreadyCommitted,
    AlreadyRefused,
    NotHovering { target_id: String },
    Store(StoreError),
}

impl Display for DragError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyCommitted => write!(f, "gesture already committed a drop"),
            Self::AlreadyRefused => write!(f, "gesture already dropped without a target"),
            Self::NotHovering { target_id } => {
                write!(f, "gesture is not hovering target `{target_id}`")
            }
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DragError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for DragError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// One pick-up-to-release pointer gesture.
pub struct DragGesture<'a> {
    source: &'a dyn Draggable,
    event: DragEvent,
    state: GestureState,
    hovered: Option<&'a dyn DragTarget>,
}

impl<'a> DragGesture<'a> {
    /// Picks up `source`, letting it write the payload.
    pub fn begin(source: &'a dyn Draggable) -> Self {
        let mut event = DragEvent::new(DataTransfer::new());
        source.pick_up(&mut event);
        Self::with_event(source, event)
    }

    /// Starts a gesture with a payload prepared elsewhere (e.g. dragged in
    /// from outside the board).
    pub fn with_event(source: &'a dyn Draggable, event: DragEvent) -> Self {
        Self {
            source,
            event,
            state: GestureState::Idle,
            hovered: None,
        }
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn event(&self) -> &DragEvent {
        &self.event
    }

    /// Payload moves over `target`; returns whether the target claimed it.
    ///
    /// Moving straight from one target to another rejects the previous one.
    pub fn hover(&mut self, target: &'a dyn DragTarget) -> Result<bool, DragError> {
        self.ensure_not_dropped()?;
        if let Some(previous) = self.hovered {
            if previous.target_id() != target.target_id() {
                previous.reject(&self.event);
            }
        }
        self.event.reset_default();
        let claimed = target.can_accept(&mut self.event);
        self.hovered = Some(target);
        self.state = GestureState::Hovering {
            target_id: target.target_id().to_string(),
        };
        Ok(claimed)
    }

    /// Payload leaves `target` without dropping.
    pub fn leave(&mut self, target: &dyn DragTarget) -> Result<(), DragError> {
        self.ensure_not_dropped()?;
        self.require_hovering(target)?;
        target.reject(&self.event);
        self.event.reset_default();
        self.hovered = None;
        self.state = GestureState::Idle;
        Ok(())
    }

    /// Payload is dropped on `target`.
    ///
    /// # Errors
    /// - `AlreadyCommitted` / `AlreadyRefused` on a second drop.
    /// - `NotHovering` when `target` is not the hovered target.
    /// - `Store` when a listener failed during the transition.
    pub fn drop_on(&mut self, target: &dyn DragTarget) -> Result<DropOutcome, DragError> {
        self.ensure_not_dropped()?;
        self.require_hovering(target)?;
        self.hovered = None;

        if !self.event.default_prevented() {
            debug!(
                "event=drop_refused module=drag status=noop target={}",
                target.target_id()
            );
            self.state = GestureState::Refused;
            return Ok(DropOutcome::Refused);
        }

        self.state = GestureState::Committed;
        let outcome = target.accept(&self.event)?;
        Ok(DropOutcome::Committed(outcome))
    }

    /// Ends the gesture and notifies the source.
    ///
    /// A target still hovered at this point is rejected first.
    pub fn end(mut self) -> GestureState {
        if let Some(target) = self.hovered.take() {
            target.reject(&self.event);
            self.state = GestureState::Idle;
        }
        self.source.release(&self.event);
        self.state
    }

    fn ensure_not_dropped(&self) -> Result<(), DragError> {
        match self.state {
            GestureState::Committed => Err(DragError::AlreadyCommitted),
            GestureState::Refused => Err(DragError::AlreadyRefused),
            _ => Ok(()),
        }
    }

    fn require_hovering(&self, target: &dyn DragTarget) -> Result<(), DragError> {
        match &self.state {
            GestureState::Hovering { target_id } if target_id == target.target_id() => Ok(()),
            _ => Err(DragError::NotHovering {
                target_id: target.target_id().to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DragError, DragGesture, DropOutcome, GestureState};
    use crate::drag::protocol::{is_id_payload, DragTarget, Draggable};
    use crate::drag::transfer::{DataTransfer, DragEvent, DropEffect, TEXT_PLAIN};
    use crate::store::observable::StoreResult;
    use crate::store::work_item_store::TransitionOutcome;
    use std::cell::{Cell, RefCell};

    struct StubSource {
        payload: (&'static str, &'static str),
        released: Cell<u32>,
    }

    impl StubSource {
        fn new(format: &'static str, data: &'static str) -> Self {
            Self {
                payload: (format, data),
                released: Cell::new(0),
            }
        }
    }

    impl Draggable for StubSource {
        fn pick_up(&self, event: &mut DragEvent) {
            event.transfer_mut().set_data(self.payload.0, self.payload.1);
            event.transfer_mut().effect_allowed = DropEffect::Move;
        }

        fn release(&self, _event: &DragEvent) {
            self.released.set(self.released.get() + 1);
        }
    }

    struct StubTarget {
        id: &'static str,
        highlighted: Cell<bool>,
        accepted: RefCell<Vec<String>>,
    }

    impl StubTarget {
        fn named(id: &'static str) -> Self {
            Self {
                id,
                highlighted: Cell::new(false),
                accepted: RefCell::new(Vec::new()),
            }
        }
    }

    impl Default for StubTarget {
        fn default() -> Self {
            Self::named("stub")
        }
    }

    impl DragTarget for StubTarget {
        fn target_id(&self) -> &str {
            self.id
        }

        fn can_accept(&self, event: &mut DragEvent) -> bool {
            if !is_id_payload(event) {
                return false;
            }
            event.prevent_default();
            self.highlighted.set(true);
            true
        }

        fn accept(&self, event: &DragEvent) -> StoreResult<TransitionOutcome> {
            let data = event.transfer().get_data(TEXT_PLAIN).unwrap_or_default();
            self.accepted.borrow_mut().push(data.to_string());
            self.highlighted.set(false);
            Ok(TransitionOutcome::Applied)
        }

        fn reject(&self, _event: &DragEvent) {
            self.highlighted.set(false);
        }
    }

    #[test]
    fn hover_then_drop_commits_once() {
        let source = StubSource::new(TEXT_PLAIN, "item-1");
        let target = StubTarget::default();
        let mut gesture = DragGesture::begin(&source);

        assert!(gesture.hover(&target).unwrap());
        assert!(target.highlighted.get());
        assert_eq!(
            gesture.drop_on(&target).unwrap(),
            DropOutcome::Committed(TransitionOutcome::Applied)
        );
        assert_eq!(gesture.state(), &GestureState::Committed);
        assert_eq!(
            gesture.drop_on(&target).unwrap_err(),
            DragError::AlreadyCommitted
        );
        assert_eq!(*target.accepted.borrow(), vec!["item-1".to_string()]);
        assert!(!target.highlighted.get());

        assert_eq!(gesture.end(), GestureState::Committed);
        assert_eq!(source.released.get(), 1);
    }

    #[test]
    fn leave_resets_affordance_and_returns_to_idle() {
        let source = StubSource::new(TEXT_PLAIN, "item-1");
        let target = StubTarget::default();
        let mut gesture = DragGesture::begin(&source);

        gesture.hover(&target).unwrap();
        gesture.leave(&target).unwrap();
        assert!(!target.highlighted.get());
        assert_eq!(gesture.state(), &GestureState::Idle);
        assert!(target.accepted.borrow().is_empty());

        assert_eq!(gesture.end(), GestureState::Idle);
        assert_eq!(source.released.get(), 1);
    }

    #[test]
    fn html_payload_is_refused_without_accept() {
        let source = StubSource::new("text/html", "<b>x</b>");
        let target = StubTarget::default();
        let mut gesture = DragGesture::begin(&source);

        assert!(!gesture.hover(&target).unwrap());
        assert!(!target.highlighted.get());
        assert_eq!(gesture.drop_on(&target).unwrap(), DropOutcome::Refused);
        assert!(target.accepted.borrow().is_empty());
    }

    #[test]
    fn drop_without_hover_is_rejected() {
        let source = StubSource::new(TEXT_PLAIN, "item-1");
        let target = StubTarget::default();
        let mut gesture = DragGesture::begin(&source);

        let err = gesture.drop_on(&target).unwrap_err();
        assert!(matches!(err, DragError::NotHovering { .. }));
        assert!(target.accepted.borrow().is_empty());
    }

    #[test]
    fn with_event_uses_foreign_payload() {
        let source = StubSource::new(TEXT_PLAIN, "ignored");
        let target = StubTarget::default();
        let mut transfer = DataTransfer::new();
        transfer.set_data(TEXT_PLAIN, "external");
        let mut gesture = DragGesture::with_event(&source, DragEvent::new(transfer));

        gesture.hover(&target).unwrap();
        gesture.drop_on(&target).unwrap();
        assert_eq!(*target.accepted.borrow(), vec!["external".to_string()]);
    }

    #[test]
    fn refused_drop_is_terminal() {
        let source = StubSource::new("text/html", "<b>x</b>");
        let target = StubTarget::default();
        let mut gesture = DragGesture::begin(&source);

        gesture.hover(&target).unwrap();
        assert_eq!(gesture.drop_on(&target).unwrap(), DropOutcome::Refused);
        assert_eq!(gesture.state(), &GestureState::Refused);

        assert_eq!(gesture.hover(&target).unwrap_err(), DragError::AlreadyRefused);
        assert_eq!(
            gesture.drop_on(&target).unwrap_err(),
            DragError::AlreadyRefused
        );
        assert!(target.accepted.borrow().is_empty());
        assert_eq!(gesture.end(), GestureState::Refused);
        assert_eq!(source.released.get(), 1);
    }

    #[test]
    fn hovering_another_target_rejects_the_previous_one() {
        let source = StubSource::new(TEXT_PLAIN, "item-1");
        let first = StubTarget::named("first");
        let second = StubTarget::named("second");
        let mut gesture = DragGesture::begin(&source);

        gesture.hover(&first).unwrap();
        assert!(first.highlighted.get());
        gesture.hover(&second).unwrap();
        assert!(!first.highlighted.get());
        assert!(second.highlighted.get());

        let err = gesture.drop_on(&first).unwrap_err();
        assert!(matches!(err, DragError::NotHovering { .. }));
        gesture.drop_on(&second).unwrap();
        assert!(first.accepted.borrow().is_empty());
        assert_eq!(*second.accepted.borrow(), vec!["item-1".to_string()]);
    }

    #[test]
    fn hovering_the_same_target_twice_keeps_the_highlight() {
        let source = StubSource::new(TEXT_PLAIN, "item-1");
        let target = StubTarget::default();
        let mut gesture = DragGesture::begin(&source);

        gesture.hover(&target).unwrap();
        gesture.hover(&target).unwrap();
        assert!(target.highlighted.get());
    }

    #[test]
    fn end_while_hovering_rejects_the_target() {
        let source = StubSource::new(TEXT_PLAIN, "item-1");
        let target = StubTarget::default();
        let mut gesture = DragGesture::begin(&source);

        gesture.hover(&target).unwrap();
        assert!(target.highlighted.get());
        assert_eq!(gesture.end(), GestureState::Idle);
        assert!(!target.highlighted.get());
        assert!(target.accepted.borrow().is_empty());
        assert_eq!(source.released.get(), 1);
    }
}
