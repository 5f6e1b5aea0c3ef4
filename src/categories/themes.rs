// Theme vocabulary.
//
// Each theme is a label plus the keywords that signal it. The lists are
// hand-curated and deliberately broad: they drive exact, prefix, synonym and
// proximity matching in the heuristic scorer, and the synthetic per-theme
// documents used for TF-IDF similarity.

pub const LOVE: &str = "Love";
pub const NATURE: &str = "Nature";
pub const DEATH_MORTALITY: &str = "Death/Mortality";
pub const TIME_CHANGE: &str = "Time/Change";
pub const IDENTITY_SELF: &str = "Identity/Self";
pub const SPIRITUALITY_FAITH: &str = "Spirituality/Faith";
pub const WAR_CONFLICT: &str = "War/Conflict";
pub const FREEDOM_OPPRESSION: &str = "Freedom/Oppression";
pub const DREAMS_IMAGINATION: &str = "Dreams/Imagination";
pub const HOPE_DESPAIR: &str = "Hope/Despair";

/// Fixed war vocabularies used by the signal booster and the heuristic
/// scorer. Canonical war poetry ("In Flanders Fields" and kin) leans on words
/// that generic scoring under-weights.
pub mod war {
    /// Counted (distinct presence) over the whole lower-cased text.
    pub const SIGNALS: [&str; 20] = [
        "war",
        "battle",
        "soldier",
        "guns",
        "poppies",
        "flanders",
        "crosses",
        "quarrel",
        "torch",
        "artillery",
        "trench",
        "bomb",
        "army",
        "military",
        "combat",
        "warrior",
        "enemy",
        "battlefield",
        "regiment",
        "battalion",
    ];

    /// Tokens that count 1.5 instead of 1 as an exact War/Conflict match.
    pub const INDICATORS: [&str; 6] = ["war", "battle", "soldier", "guns", "poppies", "flanders"];

    /// Signals checked inside each proximity window.
    pub const WINDOW_SIGNALS: [&str; 9] = [
        "flanders", "poppies", "guns", "crosses", "row", "brave", "soldier", "battle", "fought",
    ];

    /// Terms that raise the War/Conflict TF-IDF similarity.
    pub const SIMILARITY_TERMS: [&str; 7] =
        ["flanders", "poppies", "guns", "quarrel", "crosses", "row", "torch"];

    /// Word pairs that mark a text as a war poem outright.
    pub const DEFINING_PAIRS: [(&str, &str); 2] = [("flanders", "poppies"), ("crosses", "row")];
}

/// Raw (label, keywords) pairs in display order. Duplicates inside a list
/// are removed when the table is built.
pub(crate) fn raw_themes() -> Vec<(&'static str, Vec<&'static str>)> {
    vec![
        (
            LOVE,
            vec![
                "love", "heart", "romance", "passion", "emotion", "affection", "relationship",
                "desire", "intimate", "feelings", "devotion", "adoration", "attachment", "warmth",
                "tenderness", "fondness", "caring", "cherish", "infatuation", "longing",
                "compassion", "romantic", "embrace", "kiss", "heartfelt", "soulmate", "sweetheart",
                "beloved",
            ],
        ),
        (
            NATURE,
            vec![
                "nature", "environment", "ecosystem", "wildlife", "forest", "ocean", "mountain",
                "river", "animal", "plant", "wilderness", "species", "habitat", "biodiversity",
                "conservation", "organic", "sustainable", "ecosystem", "climate", "weather",
                "landscape", "terrain", "flora", "fauna", "ecology", "biosphere", "natural",
                "preservation", "environmental", "flower", "tree", "garden", "petal", "bloom",
                "leaf", "earth", "sky", "sea", "water", "breeze", "rain", "sunshine",
            ],
        ),
        (
            DEATH_MORTALITY,
            vec![
                "death", "dying", "mortality", "grave", "funeral", "cemetery", "deceased",
                "passing", "grief", "mourning", "loss", "tomb", "burial", "memorial", "perish",
                "mortal", "finite", "end", "afterlife", "heaven", "hell", "soul", "spirit",
                "eternal", "remembrance", "eulogy", "commemoration", "tribute", "legacy",
                "crosses", "dead", "lie", "died", "fallen",
            ],
        ),
        (
            TIME_CHANGE,
            vec![
                "time", "change", "transformation", "evolution", "progress", "development",
                "growth", "decay", "transition", "metamorphosis", "shift", "alteration",
                "modification", "revolution", "progression", "cycle", "era", "period", "epoch",
                "age", "fleeting", "permanent", "temporary", "eternal", "ephemeral", "memory",
                "nostalgia", "future", "past", "present", "days", "dawn", "sunset",
            ],
        ),
        (
            IDENTITY_SELF,
            vec![
                "identity", "self", "individual", "personality", "character", "essence",
                "introspection", "consciousness", "awareness", "reflection", "ego", "psyche",
                "soul", "existence", "being", "persona", "selfhood", "uniqueness", "authenticity",
                "integrity", "dignity", "pride", "honor", "reputation", "heritage", "ancestry",
                "roots", "origin", "belonging",
            ],
        ),
        (
            SPIRITUALITY_FAITH,
            vec![
                "spirituality", "faith", "belief", "religion", "divine", "sacred", "holy",
                "worship", "prayer", "meditation", "contemplation", "enlightenment",
                "transcendence", "mystical", "metaphysical", "spiritual", "soul", "deity", "god",
                "goddess", "heaven", "salvation", "blessing", "ritual", "ceremony", "devotion",
                "scripture", "prophet", "doctrine",
            ],
        ),
        (
            WAR_CONFLICT,
            vec![
                "war", "battle", "conflict", "fight", "struggle", "combat", "soldier", "army",
                "warrior", "enemy", "foe", "victory", "defeat", "peace", "truce", "armistice",
                "weapon", "gun", "sword", "battle", "bloodshed", "violence", "destruction",
                "devastation", "military", "veteran", "sacrifice", "honor", "duty", "patriotism",
                "flag", "country", "nation", "ally", "wound", "scar", "trauma", "survivor",
                "memorial", "remember", "poppies", "flanders", "field", "trench", "uniform",
                "medal", "artillery", "gunfire", "bomb", "explosion", "regiment", "battalion",
                "quarrel", "torch", "guns", "crosses", "row", "ranks", "line", "fallen",
                "comrade", "burial", "grave", "cemetery", "brave", "courage", "valor", "bravery",
                "heroism", "defend", "defense", "attack", "advance", "retreat", "march",
                "campaign",
            ],
        ),
        (
            FREEDOM_OPPRESSION,
            vec![
                "freedom", "liberty", "independence", "autonomy", "choice", "right",
                "emancipation", "liberation", "free", "oppression", "tyranny", "subjugation",
                "enslavement", "captivity", "confinement", "persecution", "suppression",
                "restriction", "limitation", "censorship", "control", "domination", "dictator",
                "totalitarian", "authoritarianism", "resistance", "rebellion", "uprising",
                "revolution", "protest", "democracy", "equality", "justice", "injustice",
            ],
        ),
        (
            DREAMS_IMAGINATION,
            vec![
                "dream", "imagination", "fantasy", "vision", "aspiration", "hope", "wish",
                "desire", "longing", "yearning", "creativity", "innovation", "inspiration",
                "idea", "concept", "thought", "mind", "contemplation", "reflection", "reverie",
                "daydream", "fantasy", "surreal", "magical", "wonder", "awe", "amazement",
                "fascination", "curiosity",
            ],
        ),
        (
            HOPE_DESPAIR,
            vec![
                "hope", "optimism", "faith", "confidence", "trust", "belief", "positivity",
                "brightness", "light", "promise", "prospect", "anticipation", "eagerness",
                "enthusiasm", "encouragement", "inspiration", "motivation", "despair",
                "hopelessness", "despondency", "depression", "gloom", "misery", "suffering",
                "anguish", "sorrow", "grief", "dejection", "desolation", "darkness", "bleakness",
                "emptiness", "void", "nihilism", "resignation", "surrender",
            ],
        ),
    ]
}
