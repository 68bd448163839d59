//! Phase and component vocabulary of the three-phase black-oil model.

use crate::error::CoreError;

/// Fluid phase. The discriminants match the conventional black-oil phase
/// indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Water = 0,
    Oil = 1,
    Gas = 2,
}

impl Phase {
    pub const COUNT: usize = 3;
    pub const ALL: [Phase; 3] = [Phase::Water, Phase::Oil, Phase::Gas];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Phase::Water => "water",
            Phase::Oil => "oil",
            Phase::Gas => "gas",
        }
    }

    pub fn is_liquid(self) -> bool {
        self != Phase::Gas
    }
}

impl TryFrom<usize> for Phase {
    type Error = CoreError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(Phase::Water),
            1 => Ok(Phase::Oil),
            2 => Ok(Phase::Gas),
            _ => Err(CoreError::InvalidPhaseIndex { index }),
        }
    }
}

/// Pseudo component. Oil, water and gas components are named after the
/// phase they form at surface conditions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Component {
    Oil = 0,
    Water = 1,
    Gas = 2,
}

impl Component {
    pub const COUNT: usize = 3;
    pub const ALL: [Component; 3] = [Component::Oil, Component::Water, Component::Gas];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Component::Oil => "Oil",
            Component::Water => "Water",
            Component::Gas => "Gas",
        }
    }
}

impl TryFrom<usize> for Component {
    type Error = CoreError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(Component::Oil),
            1 => Ok(Component::Water),
            2 => Ok(Component::Gas),
            _ => Err(CoreError::InvalidComponentIndex { index }),
        }
    }
}
