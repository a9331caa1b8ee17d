// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use serde::{Deserialize, Serialize, Serializer};

/// Coordinates are persisted as fixed six-decimal strings.
pub(crate) fn six_decimals<S: Serializer>(value: &f64, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format!("{:.6}", value))
}

pub(crate) const MACHINE_HEADER: [&str; 4] = ["zone", "machine", "latitude", "longitude"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct MachineRecord {
    pub zone: String,
    pub machine: String,
    #[serde(serialize_with = "six_decimals")]
    pub latitude: f64,
    #[serde(serialize_with = "six_decimals")]
    pub longitude: f64,
}

pub(crate) const EVENT_HEADER: [&str; 7] =
    ["zone", "machine", "latitude", "longitude", "spot", "in", "out"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct EventRecord {
    pub zone: String,
    pub machine: String,
    #[serde(serialize_with = "six_decimals")]
    pub latitude: f64,
    #[serde(serialize_with = "six_decimals")]
    pub longitude: f64,
    pub spot: u32,
    #[serde(rename = "in")]
    pub start: String,
    #[serde(rename = "out")]
    pub end: String,
}

pub(crate) const PANEL_HEADER: [&str; 8] = [
    "zone",
    "machine",
    "latitude",
    "longitude",
    "spot",
    "time",
    "wait",
    "free",
];

#[derive(Debug, Serialize)]
pub(crate) struct PanelRecord<'a> {
    pub zone: &'a str,
    pub machine: &'a str,
    #[serde(serialize_with = "six_decimals")]
    pub latitude: f64,
    #[serde(serialize_with = "six_decimals")]
    pub longitude: f64,
    pub spot: u32,
    pub time: String,
    pub wait: f64,
    pub free: u8,
}

pub(crate) const RESULTS_HEADER: [&str; 7] = [
    "zone",
    "machine",
    "latitude",
    "longitude",
    "time",
    "wait",
    "free",
];

#[derive(Debug, Serialize)]
pub(crate) struct ResultsRecord<'a> {
    pub zone: &'a str,
    pub machine: &'a str,
    #[serde(serialize_with = "six_decimals")]
    pub latitude: f64,
    #[serde(serialize_with = "six_decimals")]
    pub longitude: f64,
    pub time: String,
    pub wait: f64,
    pub free: f64,
}
