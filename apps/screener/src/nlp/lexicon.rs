//! Static word lists backing the rule-based pipeline.

/// English stop list (function words, pronouns, auxiliaries, common filler).
pub const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and",
    "any", "are", "around", "as", "at", "be", "because", "been", "before", "being", "below",
    "between", "both", "but", "by", "can", "could", "did", "do", "does", "doing", "done",
    "down", "during", "each", "either", "else", "etc", "ever", "every", "few", "for", "from",
    "further", "get", "had", "has", "have", "having", "he", "her", "here", "hers", "herself",
    "him", "himself", "his", "how", "however", "i", "if", "in", "into", "is", "it", "its",
    "itself", "just", "may", "me", "might", "more", "most", "much", "must", "my", "myself",
    "neither", "no", "nor", "not", "now", "of", "off", "often", "on", "once", "only", "or",
    "other", "our", "ours", "ourselves", "out", "over", "own", "per", "please", "put",
    "quite", "rather", "really", "same", "say", "see", "seem", "several", "she", "should",
    "since", "so", "some", "such", "than", "that", "the", "their", "theirs", "them",
    "themselves", "then", "there", "these", "they", "this", "those", "though", "through",
    "thus", "to", "too", "under", "until", "up", "upon", "us", "very", "via", "was", "we",
    "well", "were", "what", "whatever", "when", "where", "whether", "which", "while", "who",
    "whom", "whose", "why", "will", "with", "within", "without", "would", "yet", "you",
    "your", "yours", "yourself", "yourselves",
];

/// Spelled-out numbers that count as numeric-like.
pub const NUMBER_WORDS: &[&str] = &[
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "twenty", "thirty", "forty", "fifty", "hundred", "thousand",
    "million", "billion",
];

/// Base forms of verbs common in resumes and job descriptions.
pub const VERBS: &[&str] = &[
    "achieve", "analyze", "architect", "assist", "automate", "build", "collaborate",
    "communicate", "contribute", "coordinate", "create", "debug", "decrease", "define",
    "deliver", "deploy", "design", "develop", "drive", "ensure", "establish", "evaluate",
    "execute", "grow", "help", "implement", "improve", "increase", "integrate", "join",
    "launch", "lead", "maintain", "manage", "mentor", "migrate", "monitor", "optimize",
    "own", "partner", "plan", "present", "reduce", "refactor", "research", "resolve",
    "run", "scale", "ship", "support", "test", "train", "use", "work", "write",
];

/// Verbs whose bare form reads as a noun in resume text ("research", "design lead").
/// Only their inflected forms are tagged as verbs.
pub const NOUN_LIKE_VERBS: &[&str] = &[
    "design", "help", "lead", "partner", "plan", "research", "run", "scale", "support",
    "test", "train", "use", "work",
];

/// Irregular inflections mapped to their lemma.
pub const IRREGULAR_LEMMAS: &[(&str, &str)] = &[
    ("built", "build"),
    ("led", "lead"),
    ("ran", "run"),
    ("wrote", "write"),
    ("written", "write"),
    ("grew", "grow"),
    ("grown", "grow"),
    ("drove", "drive"),
    ("driven", "drive"),
    ("taught", "teach"),
    ("made", "make"),
    ("won", "win"),
    ("children", "child"),
    ("people", "person"),
    ("men", "man"),
    ("women", "woman"),
    ("analyses", "analysis"),
    ("better", "good"),
    ("best", "good"),
];

/// Adjectives that carry no telltale suffix.
pub const ADJECTIVES: &[&str] = &[
    "agile", "senior", "junior", "strong", "solid", "fast", "new", "large", "small", "deep",
    "key", "modern", "remote", "hybrid", "full", "lead", "principal", "advanced", "excellent",
    "proficient", "familiar", "skilled", "responsive", "scalable", "distributed",
];

pub const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ive", "ous", "ful", "able", "ible", "ical", "ial", "less", "ent", "ant",
];

/// Nouns that would otherwise be caught by an adjective suffix.
pub const SUFFIX_EXCEPTIONS: &[&str] = &[
    "management", "development", "deployment", "environment", "requirement", "assignment",
    "department", "student", "client", "agent", "talent", "content", "component", "event",
    "consultant", "assistant", "accountant", "applicant", "tutorial", "objective",
    "initiative", "executive", "representative",
];

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.binary_search(&word).is_ok()
}

pub fn is_number_word(word: &str) -> bool {
    NUMBER_WORDS.contains(&word)
}

pub fn is_verb(word: &str) -> bool {
    VERBS.binary_search(&word).is_ok()
}

pub fn is_noun_like_verb(word: &str) -> bool {
    NOUN_LIKE_VERBS.contains(&word)
}

pub fn irregular_lemma(word: &str) -> Option<&'static str> {
    IRREGULAR_LEMMAS
        .iter()
        .find(|(form, _)| *form == word)
        .map(|(_, lemma)| *lemma)
}
