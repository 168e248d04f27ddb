//! Drag gesture state machine.
//!
//! `Idle -> Armed` on press, `Armed -> Dragging` once the pointer travels
//! past the threshold on either axis, `Dragging -> Resolving` on release and
//! back to `Idle` when the session has resolved the drop. A release while
//! armed is a click; two clicks on the same item inside the click window
//! form a double click, a lone click fires from [`DragController::tick`]
//! after the window closes.

use loot_core::{EngineConfig, ItemId, ScreenPoint};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragPhase {
    Idle,
    Armed {
        item: ItemId,
        origin: ScreenPoint,
    },
    Dragging {
        item: ItemId,
        flipped: bool,
    },
    Resolving {
        item: ItemId,
        point: ScreenPoint,
        flipped: bool,
    },
}

/// High-level outcome of a pointer or key event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragAction {
    Started { item: ItemId },
    Moved { item: ItemId, point: ScreenPoint, flipped: bool },
    Rotated { item: ItemId, flipped: bool },
    /// Pointer released while dragging; the drop must be resolved.
    Released { item: ItemId, point: ScreenPoint, flipped: bool },
    Cancelled { item: ItemId },
    Click { item: ItemId },
    DoubleClick { item: ItemId },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PendingClick {
    item: ItemId,
    at_ms: u64,
}

#[derive(Clone, Debug)]
pub struct DragController {
    phase: DragPhase,
    threshold: f32,
    click_window_ms: u64,
    pending: Option<PendingClick>,
}

impl DragController {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            phase: DragPhase::Idle,
            threshold: config.drag_threshold,
            click_window_ms: config.double_click_window_ms,
            pending: None,
        }
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == DragPhase::Idle
    }

    /// Item currently held by the pointer, armed or dragging.
    pub fn held_item(&self) -> Option<ItemId> {
        match self.phase {
            DragPhase::Idle => None,
            DragPhase::Armed { item, .. }
            | DragPhase::Dragging { item, .. }
            | DragPhase::Resolving { item, .. } => Some(item),
        }
    }

    /// Arms a drag. Presses during another gesture are ignored.
    pub fn press(&mut self, item: ItemId, point: ScreenPoint) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.phase = DragPhase::Armed {
            item,
            origin: point,
        };
        true
    }

    pub fn motion(&mut self, point: ScreenPoint) -> Option<DragAction> {
        match self.phase {
            DragPhase::Armed { item, origin } => {
                let moved = (point.x - origin.x).abs() > self.threshold
                    || (point.y - origin.y).abs() > self.threshold;
                if !moved {
                    return None;
                }
                self.phase = DragPhase::Dragging {
                    item,
                    flipped: false,
                };
                // A drag discards any half-finished double click.
                self.pending = None;
                Some(DragAction::Started { item })
            }
            DragPhase::Dragging { item, flipped } => Some(DragAction::Moved {
                item,
                point,
                flipped,
            }),
            DragPhase::Idle | DragPhase::Resolving { .. } => None,
        }
    }

    /// Toggles the pending orientation. Only meaningful while dragging.
    pub fn rotate(&mut self) -> Option<DragAction> {
        let DragPhase::Dragging { item, flipped } = self.phase else {
            return None;
        };
        self.phase = DragPhase::Dragging {
            item,
            flipped: !flipped,
        };
        Some(DragAction::Rotated {
            item,
            flipped: !flipped,
        })
    }

    /// Ends the gesture. Returns the drag to resolve, or the click actions
    /// this release completes (a displaced pending click fires first).
    pub fn release(&mut self, point: ScreenPoint, now_ms: u64) -> Vec<DragAction> {
        match self.phase {
            DragPhase::Dragging { item, flipped } => {
                self.phase = DragPhase::Resolving {
                    item,
                    point,
                    flipped,
                };
                vec![DragAction::Released {
                    item,
                    point,
                    flipped,
                }]
            }
            DragPhase::Armed { item, .. } => {
                self.phase = DragPhase::Idle;
                self.click(item, now_ms)
            }
            DragPhase::Idle | DragPhase::Resolving { .. } => Vec::new(),
        }
    }

    fn click(&mut self, item: ItemId, now_ms: u64) -> Vec<DragAction> {
        match self.pending.take() {
            Some(first)
                if first.item == item
                    && now_ms.saturating_sub(first.at_ms) <= self.click_window_ms =>
            {
                vec![DragAction::DoubleClick { item }]
            }
            Some(other) => {
                self.pending = Some(PendingClick { item, at_ms: now_ms });
                vec![DragAction::Click { item: other.item }]
            }
            None => {
                self.pending = Some(PendingClick { item, at_ms: now_ms });
                Vec::new()
            }
        }
    }

    /// Marks the drop as resolved.
    pub fn finish(&mut self) {
        if matches!(self.phase, DragPhase::Resolving { .. }) {
            self.phase = DragPhase::Idle;
        }
    }

    /// Abandons an armed or running drag; the item stays where it was.
    pub fn cancel(&mut self) -> Option<DragAction> {
        let item = match self.phase {
            DragPhase::Armed { item, .. } | DragPhase::Dragging { item, .. } => item,
            DragPhase::Idle | DragPhase::Resolving { .. } => return None,
        };
        self.phase = DragPhase::Idle;
        Some(DragAction::Cancelled { item })
    }

    /// Fires a single click whose double-click window has passed.
    pub fn tick(&mut self, now_ms: u64) -> Option<DragAction> {
        let pending = self.pending?;
        if now_ms.saturating_sub(pending.at_ms) <= self.click_window_ms {
            return None;
        }
        self.pending = None;
        Some(DragAction::Click { item: pending.item })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> DragController {
        DragController::new(&EngineConfig::default())
    }

    fn at(x: f32, y: f32) -> ScreenPoint {
        ScreenPoint::new(x, y)
    }

    #[test]
    fn small_jitter_stays_a_click() {
        let mut drag = controller();
        assert!(drag.press(ItemId(1), at(10.0, 10.0)));
        assert_eq!(drag.motion(at(14.0, 6.0)), None);
        assert!(drag.release(at(14.0, 6.0), 1_000).is_empty());
        assert!(drag.is_idle());

        assert_eq!(drag.tick(1_150), None);
        assert_eq!(drag.tick(1_201), Some(DragAction::Click { item: ItemId(1) }));
        assert_eq!(drag.tick(2_000), None);
    }

    #[test]
    fn travel_past_threshold_starts_a_drag() {
        let mut drag = controller();
        drag.press(ItemId(1), at(10.0, 10.0));

        assert_eq!(
            drag.motion(at(16.0, 10.0)),
            Some(DragAction::Started { item: ItemId(1) })
        );
        assert_eq!(
            drag.rotate(),
            Some(DragAction::Rotated {
                item: ItemId(1),
                flipped: true
            })
        );
        assert_eq!(
            drag.release(at(40.0, 50.0), 500),
            vec![DragAction::Released {
                item: ItemId(1),
                point: at(40.0, 50.0),
                flipped: true
            }]
        );
        assert!(!drag.press(ItemId(2), at(0.0, 0.0)));

        drag.finish();
        assert!(drag.is_idle());
    }

    #[test]
    fn second_click_inside_the_window_is_a_double_click() {
        let mut drag = controller();
        drag.press(ItemId(3), at(0.0, 0.0));
        drag.release(at(0.0, 0.0), 100);
        drag.press(ItemId(3), at(0.0, 0.0));

        assert_eq!(
            drag.release(at(0.0, 0.0), 250),
            vec![DragAction::DoubleClick { item: ItemId(3) }]
        );
        assert_eq!(drag.tick(1_000), None);
    }

    #[test]
    fn slow_second_click_fires_the_first_click() {
        let mut drag = controller();
        drag.press(ItemId(3), at(0.0, 0.0));
        drag.release(at(0.0, 0.0), 100);
        drag.press(ItemId(3), at(0.0, 0.0));

        assert_eq!(
            drag.release(at(0.0, 0.0), 400),
            vec![DragAction::Click { item: ItemId(3) }]
        );
        assert_eq!(drag.tick(700), Some(DragAction::Click { item: ItemId(3) }));
    }

    #[test]
    fn rotation_is_ignored_unless_dragging() {
        let mut drag = controller();
        assert_eq!(drag.rotate(), None);
        drag.press(ItemId(1), at(0.0, 0.0));
        assert_eq!(drag.rotate(), None);
        assert_eq!(drag.cancel(), Some(DragAction::Cancelled { item: ItemId(1) }));
        assert!(drag.is_idle());
    }
}
