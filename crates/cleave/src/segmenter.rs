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

//! Maximum-autonomy segmentation.

use crate::index::Cleave;
use crate::kv::Kv;
use crate::Result;

/// Stand-in score for windows the index has no autonomy for; low enough that
/// any known alternative covering the same span wins.
const UNSEEN_PENALTY: f64 = -100.0;

/// Above this length the dynamic program's memory use becomes noticeable.
const HUGE_SENTENCE: usize = 1000;

/// Cuts token sequences into chunks maximizing summed autonomy, with no
/// chunk longer than the index order.
pub struct Segmenter<'a, S: Kv> {
    index: &'a Cleave<S>,
}

impl<'a, S: Kv> Segmenter<'a, S> {
    /// Settles pending statistics, then borrows the index read-only.
    pub fn new(index: &'a mut Cleave<S>) -> Result<Self> {
        index.update_stats()?;

        Ok(Self { index })
    }

    pub fn segment(&self, sentence: &[String]) -> Result<Vec<Vec<String>>> {
        if sentence.len() > HUGE_SENTENCE {
            tracing::warn!(
                tokens = sentence.len(),
                "segmenting a very long sentence; this will take a lot of memory"
            );
        }

        let mut tokens: Vec<&str> = Vec::with_capacity(sentence.len() + 2);
        tokens.push(self.index.start_marker());
        tokens.extend(sentence.iter().map(String::as_str));
        tokens.push(self.index.end_marker());

        let (_, cuts) = self.best_path(&tokens)?;

        let mut segments: Vec<Vec<&str>> = Vec::new();
        let mut end = tokens.len();

        while end > 0 {
            let start = end - cuts[end];
            segments.push(tokens[start..end].to_vec());
            end = start;
        }

        segments.reverse();

        // the sequence starts with the begin marker and ends with the end
        // marker; strip them and drop segments they leave empty
        if let Some(first) = segments.first_mut() {
            first.remove(0);
        }

        if let Some(last) = segments.last_mut() {
            last.pop();
        }

        Ok(segments
            .into_iter()
            .filter(|segment| !segment.is_empty())
            .map(|segment| segment.into_iter().map(str::to_string).collect())
            .collect())
    }

    /// Dynamic program over the prefixes of `tokens`: `best[i]` is the best
    /// score of any segmentation of `tokens[..i]`, where a chunk of width j
    /// scores `autonomy · j`. Returns the final score and, per prefix, the
    /// width of the last chunk of its best segmentation.
    fn best_path(&self, tokens: &[&str]) -> Result<(f64, Vec<usize>)> {
        let order = self.index.order();

        let mut best_score = vec![f64::NEG_INFINITY; tokens.len() + 1];
        best_score[0] = 0.0;

        let mut cuts = vec![0usize; tokens.len() + 1];

        for i in 1..=tokens.len() {
            for j in 1..=order.min(i) {
                let autonomy = self
                    .index
                    .autonomy(&tokens[i - j..i])?
                    .unwrap_or(UNSEEN_PENALTY);

                let score = best_score[i - j] + autonomy * j as f64;

                if score > best_score[i] {
                    best_score[i] = score;
                    cuts[i] = j;
                }
            }
        }

        Ok((best_score[tokens.len()], cuts))
    }
}
