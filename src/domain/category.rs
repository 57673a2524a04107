/// Conventional-commit categories, in changelog order
///
/// Declaration order is precedence order: classification scans [`Category::ALL`]
/// front to back and the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// A new feature
    Feat,
    /// A bug fix
    Fix,
    /// A code change that improves performance
    Perf,
    /// Documentation only changes
    Docs,
    /// Changes that do not affect the meaning of the code
    Style,
    /// A code change that neither fixes a bug nor adds a feature
    Refactor,
    /// Adding missing tests or correcting existing tests
    Test,
    /// Build system or external dependency changes
    Chore,
    /// Alternative to chore with very similar meaning
    Build,
    /// CI configuration files and scripts
    Ci,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Feat,
        Category::Fix,
        Category::Perf,
        Category::Docs,
        Category::Style,
        Category::Refactor,
        Category::Test,
        Category::Chore,
        Category::Build,
        Category::Ci,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Category::Feat => "feat",
            Category::Fix => "fix",
            Category::Perf => "perf",
            Category::Docs => "docs",
            Category::Style => "style",
            Category::Refactor => "refactor",
            Category::Test => "test",
            Category::Chore => "chore",
            Category::Build => "build",
            Category::Ci => "ci",
        }
    }

    /// Markdown header rendered above the category's changelog lines
    pub fn title(self) -> &'static str {
        match self {
            Category::Feat => "### **:zap: Features**",
            Category::Fix => "### **:wrench: Fixes**",
            Category::Perf => "### **:runner: Performance**",
            Category::Docs => "### **:books: Documentation**",
            Category::Style => "### **:nail_care: Style**",
            Category::Refactor => "### **:mountain: Refactors**",
            Category::Test => "### **:traffic_light: Tests**",
            Category::Chore => "### **:construction: Maintenance**",
            Category::Build => "### **:construction_worker: Build**",
            Category::Ci => "### **:traffic_light: CI**",
        }
    }

    /// `key:` or `key(` at the very start of the message
    pub fn matches(self, message: &str) -> bool {
        message
            .strip_prefix(self.key())
            .is_some_and(|rest| rest.starts_with(':') || rest.starts_with('('))
    }

    /// First category in declared order matching the message
    pub fn classify(message: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|category| category.matches(message))
    }
}
