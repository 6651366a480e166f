//! Segment limits and per-message pricing for SMS/MMS sends
//!
//! Carriers split long messages into segments and bill each one separately.
//! The capacity of a segment depends on the encoding:
//!
//! - **GSM-7**: 160 characters in a single segment, 153 per segment once split
//! - **Unicode (UCS-2)**: 70 characters in a single segment, 67 per segment once split
//!
//! Multi-part segments lose a few characters to the concatenation header.
//!
//! # Examples
//!
//! ```
//! use smsbudget_core::pricing::{Encoding, SmsPricing};
//!
//! assert_eq!(Encoding::Gsm7.segment_count(160), 1);
//! assert_eq!(Encoding::Gsm7.segment_count(161), 2);
//! assert_eq!(Encoding::Unicode.segment_count(71), 2);
//!
//! let pricing = SmsPricing::default();
//! assert_eq!(pricing.cost_per_segment(Encoding::Gsm7), 0.0083);
//! ```

use serde::{Deserialize, Serialize};

/// Characters that fit in a single GSM-7 segment
pub const GSM7_SINGLE_SEGMENT_LIMIT: usize = 160;
/// Characters per segment of a multi-part GSM-7 message
pub const GSM7_MULTIPART_SEGMENT_LIMIT: usize = 153;
/// Characters that fit in a single Unicode segment
pub const UNICODE_SINGLE_SEGMENT_LIMIT: usize = 70;
/// Characters per segment of a multi-part Unicode message
pub const UNICODE_MULTIPART_SEGMENT_LIMIT: usize = 67;

/// Price of one GSM-7 segment (USD)
pub const GSM7_COST_PER_SEGMENT: f64 = 0.0083;
/// Price of one Unicode segment (USD)
pub const UNICODE_COST_PER_SEGMENT: f64 = 0.0166;
/// Flat price of one MMS, independent of text length (USD)
pub const MMS_FLAT_COST: f64 = 0.02;

/// SMS payload encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Encoding {
    Gsm7,
    Unicode,
}

impl Encoding {
    pub fn single_segment_limit(self) -> usize {
        match self {
            Encoding::Gsm7 => GSM7_SINGLE_SEGMENT_LIMIT,
            Encoding::Unicode => UNICODE_SINGLE_SEGMENT_LIMIT,
        }
    }

    pub fn multipart_segment_limit(self) -> usize {
        match self {
            Encoding::Gsm7 => GSM7_MULTIPART_SEGMENT_LIMIT,
            Encoding::Unicode => UNICODE_MULTIPART_SEGMENT_LIMIT,
        }
    }

    /// Number of billed segments for a payload of `len` characters
    ///
    /// ```text
    /// len == 0       → 0
    /// len <= single  → 1
    /// otherwise      → ceil(len / multipart)
    /// ```
    pub fn segment_count(self, len: usize) -> u32 {
        if len == 0 {
            0
        } else if len <= self.single_segment_limit() {
            1
        } else {
            len.div_ceil(self.multipart_segment_limit()) as u32
        }
    }

    /// Per-segment character capacity that applies to a payload of `len` characters
    pub fn char_limit_for(self, len: usize) -> usize {
        if len <= self.single_segment_limit() {
            self.single_segment_limit()
        } else {
            self.multipart_segment_limit()
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Encoding::Gsm7 => "GSM-7",
            Encoding::Unicode => "Unicode",
        }
    }
}

/// Pricing profile for message sends
///
/// All prices are USD. `Default` carries the production rates; other profiles
/// can be injected for testing or for a different provider contract.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsPricing {
    /// Price of one GSM-7 segment
    pub gsm7_per_segment: f64,
    /// Price of one Unicode segment
    pub unicode_per_segment: f64,
    /// Flat price of one MMS
    pub mms_flat: f64,
}

impl Default for SmsPricing {
    fn default() -> Self {
        Self {
            gsm7_per_segment: GSM7_COST_PER_SEGMENT,
            unicode_per_segment: UNICODE_COST_PER_SEGMENT,
            mms_flat: MMS_FLAT_COST,
        }
    }
}

impl SmsPricing {
    pub fn cost_per_segment(&self, encoding: Encoding) -> f64 {
        match encoding {
            Encoding::Gsm7 => self.gsm7_per_segment,
            Encoding::Unicode => self.unicode_per_segment,
        }
    }

    /// Cost of sending `segments` segments in `encoding` to one recipient
    pub fn sms_cost(&self, encoding: Encoding, segments: u32) -> f64 {
        segments as f64 * self.cost_per_segment(encoding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_payload_has_no_segments() {
        assert_eq!(Encoding::Gsm7.segment_count(0), 0);
        assert_eq!(Encoding::Unicode.segment_count(0), 0);
    }

    #[test]
    fn test_gsm7_segment_boundaries() {
        assert_eq!(Encoding::Gsm7.segment_count(1), 1);
        assert_eq!(Encoding::Gsm7.segment_count(160), 1);
        assert_eq!(Encoding::Gsm7.segment_count(161), 2);
        assert_eq!(Encoding::Gsm7.segment_count(306), 2);
        assert_eq!(Encoding::Gsm7.segment_count(307), 3);
    }

    #[test]
    fn test_unicode_segment_boundaries() {
        assert_eq!(Encoding::Unicode.segment_count(70), 1);
        assert_eq!(Encoding::Unicode.segment_count(71), 2);
        assert_eq!(Encoding::Unicode.segment_count(134), 2);
        assert_eq!(Encoding::Unicode.segment_count(135), 3);
    }

    #[test]
    fn test_char_limit_switches_to_multipart() {
        assert_eq!(Encoding::Gsm7.char_limit_for(0), 160);
        assert_eq!(Encoding::Gsm7.char_limit_for(160), 160);
        assert_eq!(Encoding::Gsm7.char_limit_for(161), 153);
        assert_eq!(Encoding::Unicode.char_limit_for(71), 67);
    }

    #[test]
    fn test_default_pricing() {
        let pricing = SmsPricing::default();
        assert_eq!(pricing.cost_per_segment(Encoding::Gsm7), 0.0083);
        assert_eq!(pricing.cost_per_segment(Encoding::Unicode), 0.0166);
        assert_eq!(pricing.mms_flat, 0.02);
        assert_eq!(pricing.sms_cost(Encoding::Gsm7, 0), 0.0);
    }

    #[test]
    fn test_custom_pricing_profile() {
        let pricing = SmsPricing {
            gsm7_per_segment: 0.01,
            unicode_per_segment: 0.01,
            mms_flat: 0.05,
        };
        assert!((pricing.sms_cost(Encoding::Unicode, 3) - 0.03).abs() < 1e-12);
        assert_eq!(pricing.cost_per_segment(Encoding::Gsm7), 0.01);
    }
}
