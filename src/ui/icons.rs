pub struct Icons;

impl Icons {
    pub const PLATE: &str = "🍽️";
    pub const CHECK: &str = "✅";
    pub const WARN: &str = "⚠️";
    pub const INFO: &str = "ℹ️";
    pub const STATS: &str = "📊";
    pub const PERSON: &str = "👤";
    pub const CROWN: &str = "👑";
    pub const HEART: &str = "❤️";
    pub const STAR: &str = "⭐";
    pub const DOT: &str = "•";
}
