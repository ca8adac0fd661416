//! Prompt composition.
//!
//! Renders a localized instruction template plus the serialized conversation
//! into a single completion request. The template table is embedded and
//! immutable; a missing locale/kind pair is a configuration error, not a
//! runtime condition. Composition is side-effect-free.

use arena_core::debate::{Author, DebateSession, Locale};
use arena_core::error::{ArenaError, Result};
use minijinja::Environment;
use serde::Serialize;

/// Which instruction template to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Next opponent reply within an ongoing session.
    Turn,
    /// Performance report over a finished transcript.
    Report,
    /// Argument-flow diagram over a finished transcript.
    Diagram,
    /// Longitudinal skill profile from aggregated history.
    Profile,
}

impl PromptKind {
    fn as_str(self) -> &'static str {
        match self {
            PromptKind::Turn => "turn",
            PromptKind::Report => "report",
            PromptKind::Diagram => "diagram",
            PromptKind::Profile => "profile",
        }
    }
}

/// The substitution values a template renders with.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PromptContext {
    pub topic: String,
    pub stance: String,
    pub conversation_history: String,
    /// Rendered personality instruction snippet, when one is selected.
    pub personality: Option<String>,
    /// Aggregated history summary, for profile prompts.
    pub summary_data: Option<String>,
}

impl PromptContext {
    /// Builds the context for turn/report/diagram prompts from a session.
    pub fn from_session(session: &DebateSession) -> Self {
        Self {
            topic: session.topic.clone(),
            stance: session.stance.to_string(),
            conversation_history: render_transcript(session),
            personality: session
                .personality
                .map(|p| p.description(session.locale).to_string()),
            summary_data: None,
        }
    }

    /// Builds the context for a profile prompt.
    pub fn for_profile(summary_data: impl Into<String>) -> Self {
        Self {
            summary_data: Some(summary_data.into()),
            ..Self::default()
        }
    }
}

/// Renders the transcript as `<Label>: <text>` lines, with the fixed
/// role-label pair of the session's locale.
pub fn render_transcript(session: &DebateSession) -> String {
    let (user_label, opponent_label) = session.locale.role_labels();
    session
        .messages
        .iter()
        .map(|m| match m.author {
            Author::User => format!("{user_label}: {}", m.text),
            Author::Opponent => format!("{opponent_label}: {}", m.text),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The locale/kind template table.
pub struct PromptComposer {
    env: Environment<'static>,
}

impl PromptComposer {
    /// Creates a composer with the built-in template table.
    pub fn new() -> Self {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            // Embedded templates are compile-time constants; a parse
            // failure here is a programmer error.
            if let Err(e) = env.add_template(name, source) {
                panic!("invalid built-in template '{name}': {e}");
            }
        }
        Self { env }
    }

    /// Renders the template for a locale/kind pair.
    ///
    /// # Errors
    ///
    /// `ArenaError::Configuration` when the pair has no template or the
    /// template fails to render.
    pub fn compose(&self, kind: PromptKind, locale: Locale, ctx: &PromptContext) -> Result<String> {
        let name = format!("{}/{}", locale.as_str(), kind.as_str());
        let template = self.env.get_template(&name).map_err(|_| {
            ArenaError::configuration(format!("no prompt template for '{name}'"))
        })?;

        template
            .render(ctx)
            .map_err(|e| ArenaError::configuration(format!("template '{name}' failed to render: {e}")))
    }
}

impl Default for PromptComposer {
    fn default() -> Self {
        Self::new()
    }
}

const TEMPLATES: &[(&str, &str)] = &[
    ("en/turn", EN_TURN),
    ("en/report", EN_REPORT),
    ("en/diagram", EN_DIAGRAM),
    ("en/profile", EN_PROFILE),
    ("tr/turn", TR_TURN),
    ("tr/report", TR_REPORT),
    ("tr/diagram", TR_DIAGRAM),
    ("tr/profile", TR_PROFILE),
];

const EN_TURN: &str = r#"You are an AI debater in the 'Debate Arena' platform. Your task is to conduct a logical and evidence-based debate with the user on the selected topic.
Rules:
1. Always use a respectful, objective, and impartial tone.
2. Carefully analyze the user's arguments and respond directly to them.
3. Use general knowledge or logical deductions to support your arguments. Play your role.
4. Your answers should be clear and concise.
{% if personality %}5. {{ personality }}
{% endif %}
The current topic is: "{{ topic }}". The user is defending the "{{ stance }}" side. You will defend the opposing side. Considering the chat history, provide only your next response.

---CHAT HISTORY---
{{ conversation_history }}

AI Debater's next response:"#;

const EN_REPORT: &str = r#"Below is the full transcript of a debate between you and a user. Analyze this text like a debate coach and create a performance report based on the following criteria. The output must be in a valid JSON format. Do not wrap the JSON in code blocks.

Debate Transcript:
"""
{{ conversation_history }}
"""

Required JSON Report Schema:
{
  "strongestArgument": "Summarize the user's strongest, most logical, and persuasive argument here.",
  "weakPoint": {
    "fallacyType": "Name the most prominent logical fallacy the user committed (e.g., 'Straw Man', 'Hasty Generalization'). If there's no clear fallacy, write 'General Argument Weakness'.",
    "fallacyDefinition": "Explain what the detected logical fallacy means in one sentence.",
    "quotedSentence": "Quote the exact sentence from the user that exemplifies this fallacy.",
    "improvementAdvice": "Provide a concrete suggestion on how the user can correct this fallacy or strengthen their argument."
  },
  "evidenceUsage": "Evaluate how well the user supported their arguments with evidence, data, or examples.",
  "persuasivenessScore": "Give a score from 1 to 10 for the user's overall performance (number only).",
  "overallComment": "Add 1-2 sentences of general feedback as a coach."
}"#;

const EN_DIAGRAM: &str = r#"Analyze the following debate transcript and create a Mermaid.js diagram representing the logical flow of the text.

Rules:
1.  The output must be only and exclusively valid Mermaid.js `graph TD` (Top-Down) syntax. Do not add any other explanations or text.
2.  Summarize the user's main arguments and place them in rectangular boxes. E.g., A["Main Argument 1"].
3.  Place the sub-ideas or examples the user provides to support these main arguments in round-edged boxes. E.g., B("Supporting Idea 1.1").
4.  Place the AI Debater's counter-arguments to the user's arguments or ideas in rhombus shapes. E.g., C{"Counter-Argument 1"}.
5.  Use arrows (`-->`) to show the logical connection between arguments, supporting ideas, and counter-arguments.
6.  Keep the texts short and concise; write a summary of the idea, not the full sentence.
7.  Your response must start directly with 'graph TD'. There should be no other text, explanation, or code blocks before or after it.

Debate Transcript:
"""
{{ conversation_history }}
"""

Mermaid.js Output:
"#;

const EN_PROFILE: &str = r#"Below is aggregated performance data from a user's past debates on the 'Debate Arena' platform: their persuasiveness score series in chronological order, and how often each logical fallacy appeared in their argumentation.

Aggregated Data:
"""
{{ summary_data }}
"""

Acting as a debate coach who has followed this user across all of these sessions, synthesize a skill profile. The output must be in a valid JSON format. Do not wrap the JSON in code blocks.

Required JSON Profile Schema:
{
  "dominantFallacy": "The fallacy category the user falls into most often.",
  "adviceForFallacy": "One concrete, recurring-pattern-aware piece of advice for that fallacy.",
  "style": "A short characterization of the user's overall debating style.",
  "strength": "The user's strongest debating skill, judging from the score trend.",
  "growthArea": "The single area where focused practice would help most."
}"#;

const TR_TURN: &str = r#"Sen, 'Münazara Arenası' platformunun yapay zeka münazırısın. Görevin, kullanıcıyla seçilen bir konu üzerinde mantık ve kanıta dayalı bir münazara yapmaktır.
Kuralların:
1. Her zaman saygılı, objektif ve tarafsız bir dil kullan.
2. Kullanıcının argümanlarını dikkatle analiz et ve doğrudan bu argümanlara cevap ver.
3. Kendi argümanlarını desteklemek için genel bilgi veya mantıksal çıkarımlar kullan. Rolünü oyna.
4. Cevapların net ve anlaşılır olsun.
{% if personality %}5. {{ personality }}
{% endif %}
Şu anki konumuz: "{{ topic }}". Kullanıcı bu konuda "{{ stance }}" tarafını savunuyor. Sen ise karşı tarafı savunacaksın. Sohbet geçmişini dikkate alarak sadece sıradaki cevabını ver.

---SOHBET GEÇMİŞİ---
{{ conversation_history }}

Münazırın sıradaki cevabı:"#;

const TR_REPORT: &str = r#"Aşağıda bir kullanıcı ile senin aranda geçen münazaranın tam metni bulunmaktadır. Bu metni bir münazara eğitmeni gibi çok detaylı analiz et ve aşağıdaki kriterlere göre bir performans raporu oluştur. Çıktıyı mutlaka geçerli bir JSON formatında ver. JSON çıktısını kod bloğu içine alma.

Münazara Metni:
"""
{{ conversation_history }}
"""

JSON Formatında İstenen Rapor Şeması:
{
  "strongestArgument": "Kullanıcının sunduğu en güçlü, en mantıklı ve ikna edici argümanı buraya özetle.",
  "weakPoint": {
    "fallacyType": "Kullanıcının yaptığı en belirgin mantık hatasının adını yaz (Örn: 'Korkuluk Safsatası (Straw Man)', 'Aceleci Genelleme'). Eğer belirgin bir hata yoksa 'Genel Argüman Zayıflığı' yaz.",
    "fallacyDefinition": "Tespit ettiğin mantık hatasının ne anlama geldiğini bir cümleyle açıkla.",
    "quotedSentence": "Kullanıcının hangi cümlesinin bu hataya yol açtığını tam olarak alıntıla.",
    "improvementAdvice": "Kullanıcının bu hatayı nasıl düzeltebileceğine veya argümanını nasıl daha güçlü hale getirebileceğine dair somut bir tavsiye ver."
  },
  "evidenceUsage": "Kullanıcının argümanlarını ne kadar kanıt, veri veya örnekle desteklediğini değerlendir.",
  "persuasivenessScore": "Kullanıcının genel performansına 1'den 10'a kadar bir puan ver (sadece sayı).",
  "overallComment": "Kullanıcının performansına dair 1-2 cümlelik genel bir eğitmen yorumu ekle."
}"#;

const TR_DIAGRAM: &str = r#"Aşağıdaki münazara metnini analiz et ve metindeki mantıksal akışı temsil eden bir Mermaid.js şeması oluştur.

Kurallar:
1.  Çıktı, sadece ve sadece geçerli bir Mermaid.js `graph TD` (Top-Down) sözdizimi içermelidir.
2.  Kullanıcının ana argümanlarını özetleyerek dikdörtgen kutular içine al. Örn: A["Ana Argüman 1"].
3.  Kullanıcının bu ana argümanları desteklemek için sunduğu alt fikirleri veya örnekleri yuvarlak kenarlı kutular içine al. Örn: B("Destekleyici Fikir 1.1").
4.  Münazırın, kullanıcının argümanlarına veya fikirlerine getirdiği karşı argümanları eşkenar dörtgen şekli içine al. Örn: C{"Karşı Argüman 1"}.
5.  Okları (`-->`) kullanarak argümanlar, destekleyici fikirler ve karşı argümanlar arasındaki mantıksal bağlantıyı göster.
6.  Metinleri kısa ve öz tut, cümlenin tamamını değil, fikrin özetini yaz.
7.  Yanıtın doğrudan 'graph TD' ile başlamalıdır. Öncesinde veya sonrasında başka hiçbir metin, açıklama veya kod bloğu olmamalıdır.

Münazara Metni:
"""
{{ conversation_history }}
"""

Mermaid.js Çıktısı:
"#;

const TR_PROFILE: &str = r#"Aşağıda bir kullanıcının 'Münazara Arenası' platformundaki geçmiş münazaralarından toplanmış performans verileri bulunmaktadır: kronolojik sırayla ikna edicilik puanları ve argümanlarında her mantık hatasının kaç kez görüldüğü.

Toplanmış Veriler:
"""
{{ summary_data }}
"""

Bu kullanıcıyı tüm oturumlar boyunca takip etmiş bir münazara eğitmeni olarak bir beceri profili sentezle. Çıktıyı mutlaka geçerli bir JSON formatında ver. JSON çıktısını kod bloğu içine alma.

JSON Formatında İstenen Profil Şeması:
{
  "dominantFallacy": "Kullanıcının en sık düştüğü mantık hatası kategorisi.",
  "adviceForFallacy": "Bu hataya yönelik, tekrarlayan kalıbı dikkate alan somut bir tavsiye.",
  "style": "Kullanıcının genel münazara üslubunun kısa bir tarifi.",
  "strength": "Puan eğilimine bakarak kullanıcının en güçlü münazara becerisi.",
  "growthArea": "Odaklanılmış pratiğin en çok fayda sağlayacağı alan."
}"#;

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::debate::{Message, Personality, Stance};

    fn session() -> DebateSession {
        let mut session = DebateSession::new("nuclear energy", Stance::For, Locale::En);
        session.append(Message::user("I think it is safe"));
        session.append(Message::opponent("Consider waste disposal"));
        session
    }

    #[test]
    fn test_turn_prompt_substitutes_topic_and_stance() {
        let composer = PromptComposer::new();
        let ctx = PromptContext::from_session(&session());
        let prompt = composer.compose(PromptKind::Turn, Locale::En, &ctx).unwrap();

        assert!(prompt.contains("nuclear energy"));
        assert!(prompt.contains("\"for\""));
        assert!(prompt.contains("User: I think it is safe"));
        assert!(prompt.contains("AI Debater: Consider waste disposal"));
    }

    #[test]
    fn test_no_placeholder_tokens_survive_for_any_pair() {
        let composer = PromptComposer::new();
        let ctx = PromptContext {
            summary_data: Some("scores: [5]".to_string()),
            ..PromptContext::from_session(&session())
        };

        for locale in [Locale::En, Locale::Tr] {
            for kind in [
                PromptKind::Turn,
                PromptKind::Report,
                PromptKind::Diagram,
                PromptKind::Profile,
            ] {
                let prompt = composer.compose(kind, locale, &ctx).unwrap();
                assert!(!prompt.contains("{{"), "{locale}/{kind:?} leaks placeholders");
                assert!(!prompt.contains("{%"), "{locale}/{kind:?} leaks tags");
            }
        }
    }

    #[test]
    fn test_personality_snippet_is_rendered_when_selected() {
        let composer = PromptComposer::new();
        let with =
            PromptContext::from_session(&session().with_personality(Personality::Aggressive));
        let without = PromptContext::from_session(&session());

        let prompt_with = composer.compose(PromptKind::Turn, Locale::En, &with).unwrap();
        let prompt_without = composer
            .compose(PromptKind::Turn, Locale::En, &without)
            .unwrap();

        assert!(prompt_with.contains("assertively"));
        assert!(!prompt_without.contains("assertively"));
    }

    #[test]
    fn test_profile_prompt_embeds_summary_data() {
        let composer = PromptComposer::new();
        let ctx = PromptContext::for_profile("scores: [7, 5, 9]\nfallacies: A x2");
        let prompt = composer
            .compose(PromptKind::Profile, Locale::En, &ctx)
            .unwrap();
        assert!(prompt.contains("scores: [7, 5, 9]"));
        assert!(prompt.contains("dominantFallacy"));
    }

    #[test]
    fn test_missing_template_is_configuration_error() {
        let composer = PromptComposer {
            env: Environment::new(),
        };
        let err = composer
            .compose(PromptKind::Turn, Locale::En, &PromptContext::default())
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_transcript_uses_turkish_labels_for_tr() {
        let mut session = DebateSession::new("vergiler", Stance::Against, Locale::Tr);
        session.append(Message::user("Vergiler yüksek"));
        let rendered = render_transcript(&session);
        assert_eq!(rendered, "Kullanıcı: Vergiler yüksek");
    }
}
