// File: src/fuzzy/distance.rs

/// Levenshtein distance with unit costs for insertion, deletion and substitution,
/// counted over chars rather than bytes.
pub fn edit_distance(s: &str, t: &str) -> usize {
    strsim::levenshtein(s, t)
}

/// Length of the longest contiguous run of characters shared by `a` and `b`.
/// Cell (i, j) of the table is the run length ending at `a[i]`, `b[j]`; only the
/// previous row is kept since each cell depends on its diagonal neighbour alone.
pub fn longest_common_substring(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let mut prev = vec![0usize; b.len()];
    let mut curr = vec![0usize; b.len()];
    let mut longest = 0;

    for &a_i in &a {
        for (j, &b_j) in b.iter().enumerate() {
            curr[j] = if a_i != b_j {
                0
            } else if j == 0 {
                1
            } else {
                prev[j - 1] + 1
            };
            longest = longest.max(curr[j]);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    longest
}
