//! Pickup/destination selection driven by map clicks.
//!
//! ```text
//! NoSelection --click--> PickupSet --click--> RouteComplete
//!                           ^                      |
//!                           +--------click---------+
//! ```
//!
//! There is no terminal state; the third click discards the finished route
//! and starts over with a fresh pickup.

use crate::geo::Location;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RouteState {
    #[default]
    NoSelection,
    PickupSet {
        pickup: Location,
    },
    RouteComplete {
        pickup: Location,
        destination: Location,
    },
}

/// What a click did to the selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RouteTransition {
    PickupSelected {
        pickup: Location,
    },
    DestinationSelected {
        pickup: Location,
        destination: Location,
    },
    /// The completed route was released and `pickup` starts a new one.
    Restarted {
        previous_pickup: Location,
        previous_destination: Location,
        pickup: Location,
    },
}

#[derive(Debug, Clone, Default)]
pub struct RouteSelection {
    state: RouteState,
}

impl RouteSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RouteState {
        self.state
    }

    pub fn pickup(&self) -> Option<Location> {
        match self.state {
            RouteState::NoSelection => None,
            RouteState::PickupSet { pickup } | RouteState::RouteComplete { pickup, .. } => {
                Some(pickup)
            }
        }
    }

    pub fn destination(&self) -> Option<Location> {
        match self.state {
            RouteState::RouteComplete { destination, .. } => Some(destination),
            _ => None,
        }
    }

    pub fn apply_click(&mut self, at: Location) -> RouteTransition {
        let (next, transition) = match self.state {
            RouteState::NoSelection => (
                RouteState::PickupSet { pickup: at },
                RouteTransition::PickupSelected { pickup: at },
            ),
            RouteState::PickupSet { pickup } => (
                RouteState::RouteComplete {
                    pickup,
                    destination: at,
                },
                RouteTransition::DestinationSelected {
                    pickup,
                    destination: at,
                },
            ),
            RouteState::RouteComplete {
                pickup,
                destination,
            } => (
                RouteState::PickupSet { pickup: at },
                RouteTransition::Restarted {
                    previous_pickup: pickup,
                    previous_destination: destination,
                    pickup: at,
                },
            ),
        };
        tracing::debug!(from = ?self.state, to = ?next, "route selection transition");
        self.state = next;
        transition
    }

    pub fn clear(&mut self) {
        self.state = RouteState::NoSelection;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: Location = Location::new(40.71, -74.00);
    const B: Location = Location::new(40.75, -73.98);
    const C: Location = Location::new(40.69, -74.02);

    #[test]
    fn three_clicks_cycle_back_to_pickup() {
        let mut selection = RouteSelection::new();
        assert_eq!(selection.state(), RouteState::NoSelection);

        assert_eq!(
            selection.apply_click(A),
            RouteTransition::PickupSelected { pickup: A }
        );
        assert_eq!(selection.state(), RouteState::PickupSet { pickup: A });

        assert_eq!(
            selection.apply_click(B),
            RouteTransition::DestinationSelected {
                pickup: A,
                destination: B
            }
        );
        assert_eq!(
            selection.state(),
            RouteState::RouteComplete {
                pickup: A,
                destination: B
            }
        );

        assert_eq!(
            selection.apply_click(C),
            RouteTransition::Restarted {
                previous_pickup: A,
                previous_destination: B,
                pickup: C
            }
        );
        assert_eq!(selection.state(), RouteState::PickupSet { pickup: C });
        assert_eq!(selection.destination(), None);
    }

    #[test]
    fn destination_requires_a_pickup() {
        let mut selection = RouteSelection::new();
        assert_eq!(selection.destination(), None);
        selection.apply_click(A);
        assert_eq!(selection.pickup(), Some(A));
        assert_eq!(selection.destination(), None);
    }

    #[test]
    fn clear_returns_to_no_selection() {
        let mut selection = RouteSelection::new();
        selection.apply_click(A);
        selection.apply_click(B);
        selection.clear();
        assert_eq!(selection.state(), RouteState::NoSelection);
        assert_eq!(selection.pickup(), None);
    }
}
