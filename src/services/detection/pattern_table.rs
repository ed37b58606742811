// Built-in Pattern Table
// Curated AI-tell signatures with plain and formal alternative phrasings.
//
// Signatures are regex fragments matched case-insensitively between word boundaries.
// Alternatives are written lowercase unless they start with a proper word ("I");
// the strip stage fixes sentence-initial capitalization. An empty alternative is only
// used where the phrase is a pure sentence opener and can be dropped cleanly.

use crate::models::{Locale, PatternCategory};
use PatternCategory::{Boilerplate, Filler, SelfReference, Transition};

#[derive(Debug, Clone, PartialEq)]
pub struct PatternEntry {
    pub label: &'static str,
    pub signature: &'static str,
    pub locale: Locale,
    pub weight: f64,
    pub category: PatternCategory,
    /// Hard-strip entries must never survive humanization.
    pub hard_strip: bool,
    pub plain: &'static [&'static str],
    pub formal: &'static [&'static str],
}

impl PatternEntry {
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        locale: Locale,
        category: PatternCategory,
        weight: f64,
        hard_strip: bool,
        label: &'static str,
        signature: &'static str,
        plain: &'static [&'static str],
        formal: &'static [&'static str],
    ) -> Self {
        Self {
            label,
            signature,
            locale,
            weight,
            category,
            hard_strip,
            plain,
            formal,
        }
    }
}

const fn ru(
    category: PatternCategory,
    weight: f64,
    hard_strip: bool,
    label: &'static str,
    signature: &'static str,
    plain: &'static [&'static str],
    formal: &'static [&'static str],
) -> PatternEntry {
    PatternEntry::new(Locale::Ru, category, weight, hard_strip, label, signature, plain, formal)
}

const fn en(
    category: PatternCategory,
    weight: f64,
    hard_strip: bool,
    label: &'static str,
    signature: &'static str,
    plain: &'static [&'static str],
    formal: &'static [&'static str],
) -> PatternEntry {
    PatternEntry::new(Locale::En, category, weight, hard_strip, label, signature, plain, formal)
}

pub static BUILTIN_PATTERNS: &[PatternEntry] = &[
    // ---------------------------------------------------------------- ru: filler / hedge
    ru(Filler, 20.0, true, "следует отметить, что", r"следует\s+отметить,?\s+что", &[""], &["отметим, что"]),
    ru(Filler, 18.0, true, "стоит отметить, что", r"стоит\s+отметить,?\s+что", &[""], &["заметим, что"]),
    ru(Filler, 18.0, true, "важно отметить, что", r"важно\s+отметить,?\s+что", &[""], &["отметим, что"]),
    ru(Filler, 16.0, true, "необходимо отметить, что", r"необходимо\s+отметить,?\s+что", &[""], &["заметим, что"]),
    ru(Filler, 16.0, true, "нельзя не отметить, что", r"нельзя\s+не\s+отметить,?\s+что", &[""], &["отметим, что"]),
    ru(Filler, 15.0, true, "стоит подчеркнуть, что", r"стоит\s+подчеркнуть,?\s+что", &[""], &["заметим, что"]),
    ru(Filler, 14.0, true, "не секрет, что", r"не\s+секрет,?\s+что", &[""], &["известно, что"]),
    ru(Filler, 12.0, false, "важно понимать, что", r"важно\s+понимать,?\s+что", &[""], &["понятно, что"]),
    ru(Filler, 6.0, false, "как правило", r"как\s+правило", &["обычно"], &["обычно"]),
    ru(Filler, 10.0, false, "в той или иной степени", r"в\s+той\s+или\s+иной\s+степени", &["отчасти"], &["в известной мере"]),
    ru(Filler, 8.0, false, "так или иначе", r"так\s+или\s+иначе", &["всё равно"], &["в любом случае"]),
    ru(Filler, 5.0, false, "по сути", r"по\s+сути", &["фактически"], &["фактически"]),
    ru(Filler, 5.0, false, "в целом", r"в\s+целом", &["в общем"], &["в основном"]),
    ru(Filler, 8.0, false, "безусловно", r"безусловно", &["конечно"], &["несомненно"]),
    ru(Filler, 8.0, false, "очевидно, что", r"очевидно,?\s+что", &["ясно, что"], &["понятно, что"]),
    // ---------------------------------------------------------------- ru: transitions
    ru(Transition, 8.0, false, "кроме того", r"кроме\s+того", &["к тому же"], &["помимо этого"]),
    ru(Transition, 10.0, false, "более того", r"более\s+того", &["сверх того"], &["к тому же"]),
    ru(Transition, 10.0, false, "таким образом", r"таким\s+образом", &["выходит"], &["следовательно"]),
    ru(Transition, 12.0, true, "в заключение", r"в\s+заключение", &["напоследок"], &["в завершение"]),
    ru(Transition, 12.0, false, "подводя итоги", r"подводя\s+итоги?", &["итак"], &["итак"]),
    ru(Transition, 15.0, true, "в современном мире", r"в\s+современном\s+мире", &["сегодня", "сейчас"], &["в настоящее время"]),
    ru(Transition, 8.0, false, "на сегодняшний день", r"на\s+сегодняшний\s+день", &["сейчас"], &["ныне"]),
    ru(Transition, 8.0, false, "в свою очередь", r"в\s+свою\s+очередь", &["со своей стороны"], &["со своей стороны"]),
    ru(Transition, 6.0, false, "вместе с тем", r"вместе\s+с\s+тем", &["при этом"], &["одновременно"]),
    ru(Transition, 6.0, false, "в первую очередь", r"в\s+первую\s+очередь", &["прежде всего"], &["прежде всего"]),
    ru(Transition, 14.0, true, "исходя из вышесказанного", r"исходя\s+из\s+вышесказанного", &["поэтому"], &["следовательно"]),
    ru(Transition, 12.0, true, "как уже было сказано", r"как\s+уже\s+было\s+(?:сказано|отмечено|упомянуто)(?:\s+выше)?", &["как говорилось"], &["как указано", "как уже говорилось"]),
    ru(Transition, 10.0, false, "в рамках данной статьи", r"в\s+рамках\s+данной\s+(?:статьи|работы)", &["здесь"], &["в этой работе"]),
    // ---------------------------------------------------------------- ru: self-reference
    ru(SelfReference, 30.0, true, "как языковая модель", r"как\s+языковая\s+модель", &["как автор"], &["с позиции автора"]),
    ru(SelfReference, 30.0, true, "как искусственный интеллект", r"как\s+искусственный\s+интеллект", &["как автор"], &["с позиции автора"]),
    ru(SelfReference, 20.0, true, "надеюсь, это поможет", r"надеюсь,?\s+это\s+поможет", &["удачи"], &["это может пригодиться"]),
    ru(SelfReference, 20.0, true, "надеюсь, эта информация была полезной", r"надеюсь,?\s+эта\s+информация\s+(?:была|будет)\s+полезн(?:ой|а)", &["пусть это пригодится"], &["это может пригодиться"]),
    ru(SelfReference, 16.0, true, "если у вас остались вопросы", r"если\s+у\s+вас\s+(?:есть|возникнут|остались)\s+(?:ещё\s+|еще\s+)?вопросы", &["если что-то неясно"], &["если что-то осталось неясным"]),
    ru(SelfReference, 12.0, true, "обращайтесь, если", r"обращайтесь,?\s+если", &["пишите, если"], &["пишите, если"]),
    ru(SelfReference, 14.0, true, "рад помочь", r"рада?\s+помочь", &["всегда пожалуйста"], &["всегда пожалуйста"]),
    ru(SelfReference, 10.0, false, "давайте разберёмся", r"давайте\s+разбер[её]мся", &["посмотрим"], &["рассмотрим"]),
    ru(SelfReference, 12.0, true, "в этой статье мы рассмотрим", r"в\s+этой\s+статье\s+мы\s+(?:рассмотрим|обсудим)", &["здесь мы разберём"], &["далее анализируются"]),
    // ---------------------------------------------------------------- ru: academic boilerplate
    ru(Boilerplate, 15.0, true, "играет ключевую роль", r"играет\s+(?:ключевую|важную|огромную|значительную)\s+роль", &["много значит"], &["имеет существенное значение"]),
    ru(Boilerplate, 14.0, true, "является неотъемлемой частью", r"является\s+неотъемлемой\s+частью", &["входит в состав"], &["составляет органичную часть"]),
    ru(Boilerplate, 10.0, false, "широкий спектр", r"широкий\s+спектр", &["множество"], &["широкий круг"]),
    ru(Boilerplate, 12.0, false, "актуальность данной темы", r"актуальность\s+(?:данной|этой)\s+темы", &["значимость темы"], &["значимость темы"]),
    ru(Boilerplate, 8.0, false, "обусловлена тем, что", r"обусловлена?\s+тем,?\s+что", &["объясняется тем, что"], &["определяется тем, что"]),
    ru(Boilerplate, 8.0, false, "представляет собой", r"представляет\s+собой", &["— это"], &["является"]),
    ru(Boilerplate, 14.0, true, "является ключевым фактором", r"является\s+(?:важным|ключевым)\s+(?:аспектом|элементом|фактором)", &["— один из главных факторов"], &["выступает одним из главных факторов"]),
    ru(Boilerplate, 12.0, true, "в эпоху цифровизации", r"в\s+эпоху\s+(?:цифровизации|цифровых\s+технологий|глобализации)", &["в наше время"], &["в современных условиях"]),
    ru(Boilerplate, 14.0, true, "трудно переоценить", r"трудно\s+переоценить", &["сложно преувеличить"], &["вряд ли можно преувеличить"]),
    ru(Boilerplate, 12.0, true, "открывает новые возможности", r"открывает\s+(?:новые|широкие)\s+(?:возможности|горизонты|перспективы)", &["даёт новые шансы"], &["создаёт новые возможности"]),
    ru(Boilerplate, 8.0, false, "комплексный подход", r"комплексный\s+подход", &["подход с разных сторон"], &["системный подход"]),
    ru(Boilerplate, 8.0, false, "ключевой аспект", r"ключевой\s+аспект", &["главный момент"], &["основной момент"]),
    ru(Boilerplate, 6.0, false, "в данной работе", r"в\s+данной\s+работе", &["здесь"], &["в этой работе"]),
    // ---------------------------------------------------------------- en: filler / hedge
    en(Filler, 20.0, true, "it's worth noting that", r"it(?:'s|’s|\s+is)\s+worth\s+noting\s+that", &[""], &["we note that"]),
    en(Filler, 20.0, true, "it's important to note that", r"it(?:'s|’s|\s+is)\s+important\s+to\s+note\s+that", &[""], &["we should note that"]),
    en(Filler, 16.0, true, "it should be noted that", r"it\s+should\s+be\s+noted\s+that", &[""], &["note that", "one should note that"]),
    en(Filler, 12.0, true, "needless to say", r"needless\s+to\s+say", &["clearly"], &["plainly", "as is evident"]),
    en(Filler, 6.0, false, "in many ways", r"in\s+many\s+ways", &["often"], &["in several respects"]),
    en(Filler, 6.0, false, "to some extent", r"to\s+some\s+extent", &["partly"], &["in part"]),
    en(Filler, 6.0, false, "generally speaking", r"generally\s+speaking", &["usually"], &["as a rule"]),
    en(Filler, 10.0, true, "at the end of the day", r"at\s+the\s+end\s+of\s+the\s+day", &["ultimately"], &["in the end", "all things considered"]),
    en(Filler, 8.0, false, "when it comes to", r"when\s+it\s+comes\s+to", &["with"], &["regarding"]),
    // ---------------------------------------------------------------- en: transitions
    en(Transition, 6.0, false, "furthermore", r"furthermore", &["also"], &["besides"]),
    en(Transition, 6.0, false, "moreover", r"moreover", &["what's more"], &["besides"]),
    en(Transition, 5.0, false, "additionally", r"additionally", &["also"], &["in addition"]),
    en(Transition, 12.0, true, "in conclusion", r"in\s+conclusion", &["all told"], &["to close"]),
    en(Transition, 10.0, false, "in summary", r"in\s+summary", &["in short"], &["briefly"]),
    en(Transition, 15.0, true, "in today's fast-paced world", r"in\s+today(?:'s|’s)\s+(?:fast-paced|digital|modern|ever-changing)\s+world", &["today"], &["at present", "in the present day"]),
    en(Transition, 10.0, false, "as mentioned earlier", r"as\s+mentioned\s+(?:earlier|above|before)", &["as said"], &["as noted"]),
    en(Transition, 10.0, true, "last but not least", r"last\s+but\s+not\s+least", &["finally"], &["finally", "and finally"]),
    en(Transition, 8.0, false, "that being said", r"that\s+being\s+said", &["still"], &["even so"]),
    // ---------------------------------------------------------------- en: self-reference
    en(SelfReference, 30.0, true, "as an AI language model", r"as\s+an\s+ai(?:\s+language\s+model)?", &["as the author"], &["as the author"]),
    en(SelfReference, 30.0, true, "as a language model", r"as\s+a\s+language\s+model", &["as the author"], &["as the author"]),
    en(SelfReference, 20.0, true, "I hope this helps", r"i\s+hope\s+this\s+helps", &["good luck"], &["this should be useful"]),
    en(SelfReference, 14.0, true, "let me know if", r"let\s+me\s+know\s+if", &["tell me if"], &["please say if"]),
    en(SelfReference, 10.0, false, "feel free to", r"feel\s+free\s+to", &["you can"], &["you may"]),
    en(SelfReference, 14.0, true, "I'm happy to help", r"i(?:'m|’m|\s+am)\s+happy\s+to\s+help", &["I can help"], &["I can assist"]),
    en(SelfReference, 12.0, true, "great question", r"great\s+question", &["good point"], &["fair point"]),
    // ---------------------------------------------------------------- en: academic boilerplate
    en(Boilerplate, 15.0, true, "plays a crucial role", r"plays\s+a\s+(?:crucial|pivotal|key|vital)\s+role", &["matters a great deal"], &["is central"]),
    en(Boilerplate, 15.0, true, "play a crucial role", r"play\s+a\s+(?:crucial|pivotal|key|vital)\s+role", &["matter a great deal"], &["are central"]),
    en(Boilerplate, 12.0, true, "delve into", r"delve\s+into", &["dig into"], &["examine"]),
    en(Boilerplate, 12.0, true, "delves into", r"delves\s+into", &["digs into"], &["examines"]),
    en(Boilerplate, 12.0, true, "a testament to", r"a\s+testament\s+to", &["proof of"], &["evidence of"]),
    en(Boilerplate, 12.0, true, "rich tapestry", r"rich\s+tapestry", &["mix"], &["variety"]),
    en(Boilerplate, 12.0, true, "ever-evolving landscape", r"ever-evolving\s+landscape", &["changing field"], &["shifting field"]),
    en(Boilerplate, 12.0, true, "navigate the complexities of", r"navigate\s+the\s+complexities\s+of", &["handle"], &["deal with", "come to terms with"]),
    en(Boilerplate, 10.0, false, "in the realm of", r"in\s+the\s+realm\s+of", &["in"], &["within"]),
    en(Boilerplate, 6.0, false, "a wide range of", r"a\s+wide\s+range\s+of", &["many"], &["various"]),
    en(Boilerplate, 10.0, false, "it is crucial to", r"it\s+is\s+crucial\s+to", &["we need to"], &["one must"]),
    en(Boilerplate, 10.0, true, "paves the way for", r"paves\s+the\s+way\s+for", &["opens the door to"], &["prepares the ground for"]),
];
