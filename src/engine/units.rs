use std::ops::Range;

/// Output units produced by one engine call.
///
/// The list is owned by the encoder and reused for every call; engines clear it and append
/// the units they emit. A [`Unit`] borrows from the list and so cannot outlive the next call.
#[derive(Debug, Default)]
pub struct UnitList {
    data: Vec<u8>,
    spans: Vec<Range<usize>>,
}

impl UnitList {
    /// Create a list with room for `units` spans.
    pub fn with_capacity(units: usize) -> Self {
        Self {
            data: Vec::new(),
            spans: Vec::with_capacity(units),
        }
    }

    /// Remove all units, keeping capacity.
    pub fn clear(&mut self) {
        self.data.clear();
        self.spans.clear();
    }

    /// Append one unit holding a copy of `payload`.
    pub fn push(&mut self, payload: &[u8]) {
        let start = self.data.len();
        self.data.extend_from_slice(payload);
        self.spans.push(start..self.data.len());
    }

    /// Append one unit whose payload is written by `fill` into the list's buffer.
    pub fn push_with(&mut self, fill: impl FnOnce(&mut Vec<u8>)) {
        let start = self.data.len();
        fill(&mut self.data);
        self.spans.push(start..self.data.len());
    }

    /// Number of units.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// `true` when the last call produced no units.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Sum of all payload lengths.
    pub fn payload_len(&self) -> usize {
        self.data.len()
    }

    /// Unit spans this list can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.spans.capacity()
    }

    /// Unit `i`, if present.
    pub fn get(&self, i: usize) -> Option<Unit<'_>> {
        self.spans.get(i).map(|r| Unit {
            payload: &self.data[r.clone()],
        })
    }

    /// Units in emission order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Unit<'_>> + '_ {
        self.spans.iter().map(|r| Unit {
            payload: &self.data[r.clone()],
        })
    }
}

/// View of one compressed payload fragment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Unit<'a> {
    payload: &'a [u8],
}

impl<'a> Unit<'a> {
    /// Payload bytes.
    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// `true` for an empty payload.
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/units.rs"]
mod tests;
