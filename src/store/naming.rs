use rand::Rng;

const STOP_WORDS: [&str; 11] = [
    "the",
    "and",
    "for",
    "with",
    "that",
    "this",
    "build",
    "create",
    "make",
    "app",
    "application",
];

const FALLBACK_NAME: &str = "ai-project";

/// Derive a slug-like project name from free prompt text.
///
/// Lowercases, strips everything outside letters/digits/whitespace, drops
/// short tokens and filler words, and joins the first three survivors with
/// hyphens. A random suffix in 0..1000 keeps names from colliding; the RNG
/// is an explicit parameter so callers can seed it.
pub fn derive_project_name<R: Rng + ?Sized>(prompt: &str, rng: &mut R) -> String {
    let cleaned: String = prompt
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();

    let words: Vec<&str> = cleaned
        .split_whitespace()
        .filter(|word| word.len() > 2 && !STOP_WORDS.contains(word))
        .take(3)
        .collect();

    let base = if words.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        words.join("-")
    };

    let suffix = rng.random_range(0..1000);
    format!("{base}-{suffix}")
}

#[cfg(test)]
mod tests {
    use super::derive_project_name;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn assert_slug_shape(slug: &str) {
        let (base, suffix) = slug.rsplit_once('-').expect("slug should carry a suffix");
        assert!(!base.is_empty());
        assert!(
            suffix.len() <= 3 && suffix.chars().all(|c| c.is_ascii_digit()),
            "suffix {suffix:?} should be 1-3 digits"
        );
        assert!(
            base.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'),
            "base {base:?} should be lowercase alphanumeric with hyphens"
        );
        assert!(base.split('-').count() <= 3);
    }

    #[test]
    fn meaningful_prompts_produce_hyphenated_slugs() {
        let slug = derive_project_name("Build a todo application", &mut rng());
        assert!(slug.starts_with("todo-"));
        assert_slug_shape(&slug);
    }

    #[test]
    fn at_most_three_words_are_kept() {
        let slug = derive_project_name("fancy modern restaurant booking system tonight", &mut rng());
        let (base, _) = slug.rsplit_once('-').expect("slug should carry a suffix");
        assert_eq!(base, "fancy-modern-restaurant");
    }

    #[test]
    fn punctuation_and_case_are_normalized() {
        let slug = derive_project_name("BUILD: a Photo-Sharing site!!!", &mut rng());
        assert!(slug.starts_with("photosharing-site-"));
        assert_slug_shape(&slug);
    }

    #[test]
    fn stop_words_and_short_tokens_fall_back_to_the_default() {
        for prompt in ["build an app", "the and for", "a b cd", ""] {
            let slug = derive_project_name(prompt, &mut rng());
            let (base, _) = slug.rsplit_once('-').expect("slug should carry a suffix");
            assert_eq!(base, "ai-project", "prompt {prompt:?}");
        }
    }

    #[test]
    fn seeded_rng_makes_the_name_reproducible() {
        let a = derive_project_name("Build a todo app", &mut rng());
        let b = derive_project_name("Build a todo app", &mut rng());
        assert_eq!(a, b);
    }

    #[test]
    fn suffix_stays_in_range() {
        let mut rng = rng();
        for _ in 0..200 {
            let slug = derive_project_name("notes tracker", &mut rng);
            let (_, suffix) = slug.rsplit_once('-').expect("slug should carry a suffix");
            let n: u32 = suffix.parse().expect("suffix should be numeric");
            assert!(n < 1000);
        }
    }
}
