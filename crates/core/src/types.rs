use std::collections::{BTreeMap, BTreeSet};

/// Current field values of a form. A field with no entry is "undefined",
/// which is distinct from `null` and from the empty string.
pub type Values<K> = BTreeMap<K, serde_json::Value>;

/// Latest known error message per field. A missing entry means no error is
/// currently known, not that the field was validated and passed.
pub type Errors<K> = BTreeMap<K, String>;

/// Fields the user has blurred at least once.
pub type Touched<K> = BTreeSet<K>;
