//! Слот таблицы: Empty | Filled{key,value} | Deleted (tombstone).

/// Слоты никогда не освобождаются по одному: удаление ставит Deleted,
/// а tombstone'ы исчезают только при ресайзе.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Slot {
    #[default]
    Empty,
    Filled {
        key: String,
        value: String,
    },
    Deleted,
}

impl Slot {
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    #[inline]
    pub fn is_filled(&self) -> bool {
        matches!(self, Slot::Filled { .. })
    }

    #[inline]
    pub fn is_deleted(&self) -> bool {
        matches!(self, Slot::Deleted)
    }

    /// Пара (key, value) для живого слота.
    #[inline]
    pub fn entry(&self) -> Option<(&str, &str)> {
        match self {
            Slot::Filled { key, value } => Some((key.as_str(), value.as_str())),
            _ => None,
        }
    }

    #[inline]
    pub fn holds_key(&self, target: &str) -> bool {
        matches!(self, Slot::Filled { key, .. } if key == target)
    }
}
