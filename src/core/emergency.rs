//! # Emergency Filter Engine
//!
//! Pure functions over emergency blood requests: urgency classification for
//! display, and stable filtering by blood type, urgency, or location.
//!
//! ```text
//! records ──► filter_emergencies(kind, value) ──► Vec<&EmergencyRequest>
//!                    │
//!                    ├── "bloodType"  exact match
//!                    ├── "urgency"    exact match
//!                    ├── "location"   case-insensitive substring
//!                    └── anything else → no-op
//! ```
//!
//! Nothing here owns state or performs I/O. Records are borrowed, never
//! copied or mutated, so a filtered view keeps element identity and order.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Value meaning "no filtering" for any criterion.
pub const ALL_SENTINEL: &str = "All";

// ============================================================================
// Blood Type
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BloodType {
    APos,
    ANeg,
    BPos,
    BNeg,
    AbPos,
    AbNeg,
    OPos,
    ONeg,
}

impl BloodType {
    pub const ALL: [BloodType; 8] = [
        BloodType::APos,
        BloodType::ANeg,
        BloodType::BPos,
        BloodType::BNeg,
        BloodType::AbPos,
        BloodType::AbNeg,
        BloodType::OPos,
        BloodType::ONeg,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BloodType::APos => "A+",
            BloodType::ANeg => "A-",
            BloodType::BPos => "B+",
            BloodType::BNeg => "B-",
            BloodType::AbPos => "AB+",
            BloodType::AbNeg => "AB-",
            BloodType::OPos => "O+",
            BloodType::ONeg => "O-",
        }
    }

    pub fn parse(s: &str) -> Option<BloodType> {
        BloodType::ALL.into_iter().find(|bt| bt.as_str() == s.trim())
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for BloodType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        BloodType::parse(&value).ok_or_else(|| format!("unknown blood type: {value}"))
    }
}

impl From<BloodType> for String {
    fn from(value: BloodType) -> Self {
        value.as_str().to_string()
    }
}

// ============================================================================
// Urgency
// ============================================================================

/// Urgency label of a request. Labels outside the known four are kept
/// verbatim in `Other` so they can still be displayed (as neutral).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Urgency {
    Critical,
    High,
    Medium,
    Low,
    Other(String),
}

impl Urgency {
    /// The known levels, most severe first.
    pub const LEVELS: [Urgency; 4] = [Urgency::Critical, Urgency::High, Urgency::Medium, Urgency::Low];

    pub fn as_str(&self) -> &str {
        match self {
            Urgency::Critical => "Critical",
            Urgency::High => "High",
            Urgency::Medium => "Medium",
            Urgency::Low => "Low",
            Urgency::Other(s) => s,
        }
    }

    pub fn display_class(&self) -> DisplayClass {
        classify_urgency(self.as_str())
    }

    /// Sort key: 0 for Critical through 3 for Low, unknown labels last.
    pub fn severity_rank(&self) -> u8 {
        match self {
            Urgency::Critical => 0,
            Urgency::High => 1,
            Urgency::Medium => 2,
            Urgency::Low => 3,
            Urgency::Other(_) => 4,
        }
    }
}

impl From<String> for Urgency {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Critical" => Urgency::Critical,
            "High" => Urgency::High,
            "Medium" => Urgency::Medium,
            "Low" => Urgency::Low,
            _ => Urgency::Other(value),
        }
    }
}

impl From<Urgency> for String {
    fn from(value: Urgency) -> Self {
        match value {
            Urgency::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Display Classification
// ============================================================================

/// Visual emphasis of an urgency label. The front end maps each class to a
/// palette color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayClass {
    Severe,
    Elevated,
    Moderate,
    Mild,
    Neutral,
}

impl DisplayClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayClass::Severe => "severe",
            DisplayClass::Elevated => "elevated",
            DisplayClass::Moderate => "moderate",
            DisplayClass::Mild => "mild",
            DisplayClass::Neutral => "neutral",
        }
    }
}

/// Maps an urgency label to its display class. Total: unrecognized labels
/// (including the empty string) are `Neutral`.
pub fn classify_urgency(urgency: &str) -> DisplayClass {
    match urgency {
        "Critical" => DisplayClass::Severe,
        "High" => DisplayClass::Elevated,
        "Medium" => DisplayClass::Moderate,
        "Low" => DisplayClass::Mild,
        _ => DisplayClass::Neutral,
    }
}

// ============================================================================
// Emergency Request
// ============================================================================

/// One emergency blood request as supplied by the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub blood_type: BloodType,
    pub urgency: Urgency,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hospital: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units_needed: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_at: Option<DateTime<Utc>>,
}

impl EmergencyRequest {
    pub fn new(blood_type: BloodType, urgency: Urgency, location: impl Into<String>) -> Self {
        Self {
            id: None,
            blood_type,
            urgency,
            location: location.into(),
            hospital: None,
            units_needed: None,
            contact: None,
            posted_at: None,
        }
    }
}

// ============================================================================
// Filtering
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    BloodType,
    Urgency,
    Location,
}

impl FilterKind {
    /// Parses the wire name of a criterion. Unknown names yield `None`,
    /// which callers treat as "no filter".
    pub fn parse(s: &str) -> Option<FilterKind> {
        match s {
            "bloodType" => Some(FilterKind::BloodType),
            "urgency" => Some(FilterKind::Urgency),
            "location" => Some(FilterKind::Location),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::BloodType => "bloodType",
            FilterKind::Urgency => "urgency",
            FilterKind::Location => "location",
        }
    }
}

/// A single filter criterion, built per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriterion {
    pub kind: FilterKind,
    pub value: Option<String>,
}

impl FilterCriterion {
    pub fn new(kind: FilterKind, value: Option<impl Into<String>>) -> Self {
        Self {
            kind,
            value: value.map(Into::into),
        }
    }

    /// True if this criterion lets every record through.
    pub fn is_pass_through(&self) -> bool {
        matches!(self.value.as_deref(), None | Some(ALL_SENTINEL))
    }

    pub fn matches(&self, record: &EmergencyRequest) -> bool {
        let Some(value) = self.value.as_deref() else {
            return true;
        };
        if value == ALL_SENTINEL {
            return true;
        }
        match self.kind {
            FilterKind::BloodType => record.blood_type.as_str() == value,
            FilterKind::Urgency => record.urgency.as_str() == value,
            FilterKind::Location => record
                .location
                .to_lowercase()
                .contains(&value.to_lowercase()),
        }
    }

    pub fn apply<'a>(&self, records: &'a [EmergencyRequest]) -> Vec<&'a EmergencyRequest> {
        self.apply_refs(records.iter())
    }

    fn apply_refs<'a>(
        &self,
        records: impl Iterator<Item = &'a EmergencyRequest>,
    ) -> Vec<&'a EmergencyRequest> {
        if self.is_pass_through() {
            return records.collect();
        }
        records.filter(|r| self.matches(r)).collect()
    }
}

/// Narrows `records` by one criterion, preserving order.
///
/// `value` of `None` or `"All"` returns every record. An unknown `kind`
/// also returns every record.
pub fn filter_emergencies<'a>(
    records: &'a [EmergencyRequest],
    kind: &str,
    value: Option<&str>,
) -> Vec<&'a EmergencyRequest> {
    match FilterKind::parse(kind) {
        Some(kind) => FilterCriterion::new(kind, value).apply(records),
        None => records.iter().collect(),
    }
}

/// The three filter bar criteria combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmergencyFilter {
    pub blood_type: Option<BloodType>,
    pub urgency: Option<Urgency>,
    pub location: String,
}

impl EmergencyFilter {
    pub fn is_empty(&self) -> bool {
        self.blood_type.is_none() && self.urgency.is_none() && self.location.trim().is_empty()
    }

    pub fn criteria(&self) -> [FilterCriterion; 3] {
        let location = self.location.trim();
        [
            FilterCriterion::new(FilterKind::BloodType, self.blood_type.map(|b| b.as_str())),
            FilterCriterion::new(FilterKind::Urgency, self.urgency.as_ref().map(|u| u.as_str())),
            FilterCriterion::new(
                FilterKind::Location,
                (!location.is_empty()).then_some(location),
            ),
        ]
    }

    pub fn apply<'a>(&self, records: &'a [EmergencyRequest]) -> Vec<&'a EmergencyRequest> {
        let mut view: Vec<&EmergencyRequest> = records.iter().collect();
        for criterion in self.criteria() {
            view = criterion.apply_refs(view.into_iter());
        }
        view
    }

    /// Steps the blood type filter: All → A+ → ... → O- → All.
    pub fn cycle_blood_type(&mut self) {
        self.blood_type = match self.blood_type {
            None => Some(BloodType::ALL[0]),
            Some(current) => BloodType::ALL
                .iter()
                .position(|bt| *bt == current)
                .and_then(|i| BloodType::ALL.get(i + 1).copied()),
        };
    }

    /// Steps the urgency filter: All → Critical → ... → Low → All.
    pub fn cycle_urgency(&mut self) {
        self.urgency = match &self.urgency {
            None => Some(Urgency::Critical),
            Some(current) => Urgency::LEVELS
                .iter()
                .position(|u| u == current)
                .and_then(|i| Urgency::LEVELS.get(i + 1).cloned()),
        };
    }
}

/// Orders records most severe first; ties keep their feed order.
pub fn sort_by_severity(records: &mut [&EmergencyRequest]) {
    records.sort_by_key(|r| r.urgency.severity_rank());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(bt: BloodType, urgency: &str, location: &str) -> EmergencyRequest {
        EmergencyRequest::new(bt, Urgency::from(urgency.to_string()), location)
    }

    fn sample() -> Vec<EmergencyRequest> {
        vec![
            record(BloodType::OPos, "Critical", "Hyderabad"),
            record(BloodType::ANeg, "Low", "Delhi"),
            record(BloodType::OPos, "High", "HYDERABAD Central"),
            record(BloodType::AbPos, "Medium", "Bengaluru"),
        ]
    }

    #[test]
    fn test_classify_known_levels() {
        assert_eq!(classify_urgency("Critical"), DisplayClass::Severe);
        assert_eq!(classify_urgency("High"), DisplayClass::Elevated);
        assert_eq!(classify_urgency("Medium"), DisplayClass::Moderate);
        assert_eq!(classify_urgency("Low"), DisplayClass::Mild);
    }

    #[test]
    fn test_classify_unknown_is_neutral() {
        for label in ["", "critical", "URGENT", "Low ", "Severe", "??"] {
            assert_eq!(classify_urgency(label), DisplayClass::Neutral, "label {label:?}");
        }
    }

    #[test]
    fn test_all_sentinel_returns_same_elements_in_order() {
        let records = sample();
        let view = filter_emergencies(&records, "bloodType", Some("All"));
        assert_eq!(view.len(), records.len());
        for (filtered, original) in view.iter().zip(records.iter()) {
            assert!(std::ptr::eq(*filtered, original));
        }
    }

    #[test]
    fn test_missing_value_is_identity() {
        let records = sample();
        let view = filter_emergencies(&records, "urgency", None);
        assert_eq!(view.len(), records.len());
    }

    #[test]
    fn test_location_is_case_insensitive_substring() {
        let records = vec![
            record(BloodType::OPos, "High", "Hyderabad"),
            record(BloodType::OPos, "High", "Delhi"),
            record(BloodType::OPos, "High", "HYDERABAD Central"),
        ];
        let view = filter_emergencies(&records, "location", Some("hyder"));
        assert_eq!(view.len(), 2);
        assert!(std::ptr::eq(view[0], &records[0]));
        assert!(std::ptr::eq(view[1], &records[2]));
    }

    #[test]
    fn test_blood_type_exact_match() {
        let records = sample();
        let view = filter_emergencies(&records, "bloodType", Some("O+"));
        assert_eq!(view.len(), 2);
        assert!(view.iter().all(|r| r.blood_type == BloodType::OPos));

        // "O" is not a blood type, and matching is not by substring
        assert!(filter_emergencies(&records, "bloodType", Some("O")).is_empty());
    }

    #[test]
    fn test_urgency_exact_match() {
        let records = sample();
        let view = filter_emergencies(&records, "urgency", Some("Critical"));
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].location, "Hyderabad");
        assert!(filter_emergencies(&records, "urgency", Some("critical")).is_empty());
    }

    #[test]
    fn test_unknown_kind_is_noop() {
        let records = sample();
        let view = filter_emergencies(&records, "hospital", Some("Apollo"));
        assert_eq!(view.len(), records.len());
    }

    #[test]
    fn test_filter_does_not_mutate_input() {
        let records = sample();
        let before = records.clone();
        let _ = filter_emergencies(&records, "location", Some("delhi"));
        assert_eq!(records, before);
    }

    #[test]
    fn test_combined_filter() {
        let records = sample();
        let filter = EmergencyFilter {
            blood_type: Some(BloodType::OPos),
            urgency: None,
            location: "central".to_string(),
        };
        let view = filter.apply(&records);
        assert_eq!(view.len(), 1);
        assert!(std::ptr::eq(view[0], &records[2]));
        assert!(EmergencyFilter::default().apply(&records).len() == records.len());
    }

    #[test]
    fn test_cycle_blood_type_wraps_to_all() {
        let mut filter = EmergencyFilter::default();
        for expected in BloodType::ALL {
            filter.cycle_blood_type();
            assert_eq!(filter.blood_type, Some(expected));
        }
        filter.cycle_blood_type();
        assert_eq!(filter.blood_type, None);
    }

    #[test]
    fn test_cycle_urgency_wraps_to_all() {
        let mut filter = EmergencyFilter::default();
        filter.cycle_urgency();
        assert_eq!(filter.urgency, Some(Urgency::Critical));
        for _ in 0..3 {
            filter.cycle_urgency();
        }
        assert_eq!(filter.urgency, Some(Urgency::Low));
        filter.cycle_urgency();
        assert_eq!(filter.urgency, None);
    }

    #[test]
    fn test_sort_by_severity_is_stable() {
        let records = sample();
        let mut view: Vec<&EmergencyRequest> = records.iter().collect();
        sort_by_severity(&mut view);
        let order: Vec<&str> = view.iter().map(|r| r.urgency.as_str()).collect();
        assert_eq!(order, vec!["Critical", "High", "Medium", "Low"]);
    }

    #[test]
    fn test_request_json_shape() {
        let json = r#"{
            "id": "req-1",
            "bloodType": "AB-",
            "urgency": "Urgent",
            "location": "Chennai",
            "unitsNeeded": 3,
            "postedAt": "2024-03-01T10:00:00Z"
        }"#;
        let req: EmergencyRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.blood_type, BloodType::AbNeg);
        assert_eq!(req.urgency, Urgency::Other("Urgent".to_string()));
        assert_eq!(req.urgency.display_class(), DisplayClass::Neutral);
        assert_eq!(req.units_needed, Some(3));
        assert!(req.hospital.is_none());

        let bad = r#"{"bloodType": "C+", "urgency": "Low", "location": "x"}"#;
        assert!(serde_json::from_str::<EmergencyRequest>(bad).is_err());
    }
}
