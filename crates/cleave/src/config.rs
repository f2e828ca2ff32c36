// Cleave is an open source word segmentation engine.
// Copyright (C) 2024 Cleave contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

mod defaults {
    pub fn start_marker() -> String {
        "^".to_string()
    }

    pub fn end_marker() -> String {
        "$".to_string()
    }
}

/// Configuration of a bidirectional index.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct IndexConfig {
    /// Maximum segment length. The tries store ngrams up to `order + 1`
    /// tokens so that depth-`order` nodes still have children to compute
    /// their entropy from. Must be greater than 1.
    pub order: usize,

    /// Token prepended to every sentence; treated as a sentence boundary by
    /// the entropy computation.
    #[serde(default = "defaults::start_marker")]
    pub start_marker: String,

    /// Token appended to every sentence.
    #[serde(default = "defaults::end_marker")]
    pub end_marker: String,
}

impl IndexConfig {
    pub fn new(order: usize) -> Self {
        Self {
            order,
            start_marker: defaults::start_marker(),
            end_marker: defaults::end_marker(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_default() {
        let config: IndexConfig = serde_json::from_str(r#"{ "order": 3 }"#).unwrap();

        assert_eq!(config.order, 3);
        assert_eq!(config.start_marker, "^");
        assert_eq!(config.end_marker, "$");
    }

    #[test]
    fn markers_overridable() {
        let config: IndexConfig =
            serde_json::from_str(r#"{ "order": 2, "start_marker": "<s>", "end_marker": "</s>" }"#)
                .unwrap();

        assert_eq!(config.start_marker, "<s>");
        assert_eq!(config.end_marker, "</s>");
    }
}
