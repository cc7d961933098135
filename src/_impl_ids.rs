use crate::{BoardId, NodeId, SwitchId};
use std::fmt::{Display, Error, Formatter};

impl NodeId {
    pub fn to_index(self) -> usize {
        self.0
    }
}

impl SwitchId {
    pub fn to_index(self) -> usize {
        self.0
    }
}

impl BoardId {
    pub fn to_index(self) -> usize {
        self.0
    }
}

impl From<usize> for NodeId {
    fn from(val: usize) -> Self {
        NodeId(val)
    }
}

impl From<NodeId> for usize {
    fn from(value: NodeId) -> Self {
        value.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "Product({})", self.0)
    }
}

impl Display for SwitchId {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "Switch({})", self.0)
    }
}

impl Display for BoardId {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "SwitchBoard({})", self.0)
    }
}
