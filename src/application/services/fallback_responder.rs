//! Keyword-matching Czech responder used when the chat model is unavailable.

pub const FALLBACK_MODEL: &str = "basic-czech";

struct Rule {
    keywords: &'static [&'static str],
    reply: &'static str,
}

// First match wins.
const RULES: &[Rule] = &[
    Rule {
        keywords: &["ahoj", "zdravím", "dobrý den"],
        reply: "Ahoj! Jak se máš? Jsem AI asistent a jsem tu, abych ti pomohl.",
    },
    Rule {
        keywords: &["jak se máš", "co děláš"],
        reply: "Mám se skvěle! Děkuji za optání. Jak ti můžu pomoci?",
    },
    Rule {
        keywords: &["pomoc", "pomoct", "pomož"],
        reply: "Rád ti pomohu! Jakou pomoc potřebuješ?",
    },
    Rule {
        keywords: &["děkuji", "díky", "děkuju"],
        reply: "Není za co! Pokud budeš potřebovat další pomoc, jen se zeptej.",
    },
    Rule {
        keywords: &["co umíš", "co dokážeš"],
        reply: "Jsem AI asistent a mohu ti pomoci s různými otázkami a úkoly. Můžeme si také jen popovídat v češtině.",
    },
    Rule {
        keywords: &["počasí", "kolik je hodin"],
        reply: "Bohužel nemám přístup k aktuálnímu počasí ani času. Můžu ti pomoci s něčím jiným?",
    },
];

/// Returns the canned reply for `message`, echoing it back when no rule matches.
pub fn fallback_reply(message: &str) -> String {
    let lowered = message.to_lowercase();

    RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| lowered.contains(k)))
        .map(|rule| rule.reply.to_string())
        .unwrap_or_else(|| format!("Rozumím tvé zprávě: \"{}\". Jak ti mohu pomoci?", message))
}
