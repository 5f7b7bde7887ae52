pub const QUESTIONS_PER_PAGE: i64 = 10;

/// Offset of the first row on a 1-indexed page. Pages before the first have none.
pub fn page_offset(page: i64) -> Option<i64> {
    if page < 1 {
        return None;
    }
    (page - 1).checked_mul(QUESTIONS_PER_PAGE)
}
