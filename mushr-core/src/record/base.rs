//! Base implementation of records.
use crate::error::MushrCoreError;
use std::collections::{
    hash_map::{Iter, Keys},
    HashMap,
};

/// Possible types of values stored in a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    /// A single floating-point value, e.g., a reward term.
    Scalar(f32),

    /// A 1-dimensional array, e.g., a flattened observation.
    Array1(Vec<f32>),

    /// A text value.
    String(String),
}

/// A container of key-value pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record(HashMap<String, RecordValue>);

impl Record {
    /// Creates an empty record.
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    /// Creates a record containing a single scalar value.
    pub fn from_scalar(name: impl Into<String>, value: f32) -> Self {
        Self(HashMap::from([(name.into(), RecordValue::Scalar(value))]))
    }

    /// Creates a record from a slice of key-value pairs.
    pub fn from_slice<K: Into<String> + Clone>(s: &[(K, RecordValue)]) -> Self {
        Self(
            s.iter()
                .map(|(k, v)| (k.clone().into(), v.clone()))
                .collect(),
        )
    }

    /// Returns an iterator over the keys in the record.
    pub fn keys(&self) -> Keys<'_, String, RecordValue> {
        self.0.keys()
    }

    /// Inserts a key-value pair into the record.
    pub fn insert(&mut self, k: impl Into<String>, v: RecordValue) {
        self.0.insert(k.into(), v);
    }

    /// Returns an iterator over the key-value pairs in the record.
    pub fn iter(&self) -> Iter<'_, String, RecordValue> {
        self.0.iter()
    }

    /// Gets a reference to the value associated with the given key.
    pub fn get(&self, k: &str) -> Option<&RecordValue> {
        self.0.get(k)
    }

    /// Merges two records, consuming both.
    ///
    /// Values of `record` overwrite values of `self` with the same key.
    pub fn merge(self, record: Record) -> Self {
        Record(self.0.into_iter().chain(record.0).collect())
    }

    /// Merges another record into this one in place.
    pub fn merge_inplace(&mut self, record: Record) {
        for (k, v) in record.0 {
            self.0.insert(k, v);
        }
    }

    /// Gets a scalar value.
    pub fn get_scalar(&self, k: &str) -> Result<f32, MushrCoreError> {
        match self.0.get(k) {
            Some(RecordValue::Scalar(v)) => Ok(*v),
            Some(_) => Err(MushrCoreError::RecordValueTypeError("Scalar".to_string())),
            None => Err(MushrCoreError::RecordKeyError(k.to_string())),
        }
    }

    /// Gets a 1-dimensional array.
    pub fn get_array1(&self, k: &str) -> Result<Vec<f32>, MushrCoreError> {
        match self.0.get(k) {
            Some(RecordValue::Array1(v)) => Ok(v.clone()),
            Some(_) => Err(MushrCoreError::RecordValueTypeError("Array1".to_string())),
            None => Err(MushrCoreError::RecordKeyError(k.to_string())),
        }
    }

    /// Gets a string value.
    pub fn get_string(&self, k: &str) -> Result<String, MushrCoreError> {
        match self.0.get(k) {
            Some(RecordValue::String(s)) => Ok(s.clone()),
            Some(_) => Err(MushrCoreError::RecordValueTypeError("String".to_string())),
            None => Err(MushrCoreError::RecordKeyError(k.to_string())),
        }
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks if the record is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_overwrites_with_second_record() {
        let a = Record::from_slice(&[
            ("reward", RecordValue::Scalar(1.0)),
            ("label", RecordValue::String("a".to_string())),
        ]);
        let b = Record::from_scalar("reward", 2.0);
        let merged = a.merge(b);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged.get_scalar("reward").unwrap(), 2.0);
        assert_eq!(merged.get_string("label").unwrap(), "a");
    }

    #[test]
    fn test_merge_inplace() {
        let mut record = Record::from_scalar("reward", 1.0);
        record.merge_inplace(Record::from_slice(&[
            ("reward", RecordValue::Scalar(3.0)),
            ("distance", RecordValue::Scalar(0.25)),
        ]));

        let mut keys = record.keys().cloned().collect::<Vec<_>>();
        keys.sort();
        assert_eq!(keys, vec!["distance", "reward"]);
        let total: f32 = record
            .iter()
            .filter_map(|(_, v)| match v {
                RecordValue::Scalar(x) => Some(*x),
                _ => None,
            })
            .sum();
        assert_eq!(total, 3.25);
    }

    #[test]
    fn test_typed_getters_report_errors() {
        let record = Record::from_scalar("reward", 0.5);

        assert!(matches!(
            record.get_array1("reward"),
            Err(MushrCoreError::RecordValueTypeError(_))
        ));
        assert!(matches!(
            record.get_scalar("missing"),
            Err(MushrCoreError::RecordKeyError(_))
        ));
    }
}
