// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! C3 linearization, the standard method-resolution order for multiple bases.

/// The sequences admit no order that respects all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearizationError;

/// Merges `sequences` with the C3 rule.
///
/// Repeatedly takes the first head that does not appear in the tail of any
/// sequence. To linearize a type with bases `B1..Bn`, pass the linearization
/// of every base followed by the list `[B1..Bn]` itself.
pub fn c3_merge<T, F>(mut sequences: Vec<Vec<T>>, same: F) -> Result<Vec<T>, LinearizationError>
where
    T: Clone,
    F: Fn(&T, &T) -> bool,
{
    let mut merged = Vec::new();
    loop {
        sequences.retain(|seq| !seq.is_empty());
        if sequences.is_empty() {
            return Ok(merged);
        }

        let next = sequences
            .iter()
            .map(|seq| &seq[0])
            .find(|&head| {
                !sequences
                    .iter()
                    .any(|seq| seq[1..].iter().any(|item| same(item, head)))
            })
            .cloned()
            .ok_or(LinearizationError)?;

        for seq in sequences.iter_mut() {
            if same(&seq[0], &next) {
                seq.remove(0);
            }
        }
        merged.push(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lin(sequences: Vec<Vec<&'static str>>) -> Result<Vec<&'static str>, LinearizationError> {
        c3_merge(sequences, |a, b| a == b)
    }

    #[test]
    fn test_single_chain() {
        let merged = lin(vec![vec!["B", "A"], vec!["B"]]).unwrap();
        assert_eq!(merged, vec!["B", "A"]);
    }

    #[test]
    fn test_diamond() {
        // D(B, C), B(A), C(A)
        let merged = lin(vec![vec!["B", "A"], vec!["C", "A"], vec!["B", "C"]]).unwrap();
        assert_eq!(merged, vec!["B", "C", "A"]);
    }

    #[test]
    fn test_inconsistent_order() {
        // X(A, B) with B(A): A must come after B but is listed first.
        let result = lin(vec![vec!["A"], vec!["B", "A"], vec!["A", "B"]]);
        assert_eq!(result, Err(LinearizationError));
    }

    #[test]
    fn test_no_sequences() {
        assert_eq!(lin(Vec::new()).unwrap(), Vec::<&str>::new());
    }
}
