pub fn spending_summary_key(user_id: &str) -> String {
    format!("spending_summary:{}", user_id)
}
