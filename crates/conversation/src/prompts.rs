//! Localized conversation prompts and affirmative tokens
//!
//! Prompts are looked up by `(language, key)` with an explicit fallback
//! chain: locales without a translated set fall back to English, the
//! base language of the system.

use saarthi_core::Language;

/// Keys into the prompt catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptKey {
    Intro,
    AskName,
    AskPhone,
    AskEmail,
    AskMessage,
    Confirm,
    Complete,
    InvalidPhone,
    InvalidEmail,
}

/// One language's complete prompt set.
struct PromptSet {
    intro: &'static str,
    ask_name: &'static str,
    ask_phone: &'static str,
    ask_email: &'static str,
    ask_message: &'static str,
    confirm: &'static str,
    complete: &'static str,
    invalid_phone: &'static str,
    invalid_email: &'static str,
}

impl PromptSet {
    fn get(&self, key: PromptKey) -> &'static str {
        match key {
            PromptKey::Intro => self.intro,
            PromptKey::AskName => self.ask_name,
            PromptKey::AskPhone => self.ask_phone,
            PromptKey::AskEmail => self.ask_email,
            PromptKey::AskMessage => self.ask_message,
            PromptKey::Confirm => self.confirm,
            PromptKey::Complete => self.complete,
            PromptKey::InvalidPhone => self.invalid_phone,
            PromptKey::InvalidEmail => self.invalid_email,
        }
    }
}

static ENGLISH: PromptSet = PromptSet {
    intro: "Hi there! I'm here to help you submit your information. \
            You can speak or type your answers. Let's start with your name.",
    ask_name: "What is your name?",
    ask_phone: "Great! Now, what's your phone number?",
    ask_email: "Thanks! What's your email address?",
    ask_message: "Almost done! Please share a brief message about what you need help with.",
    confirm: "Here's what I've collected. Is this correct?",
    complete: "Thank you! Your information has been submitted successfully.",
    invalid_phone: "Please enter a valid 10-digit phone number",
    invalid_email: "Please enter a valid email address",
};

static HINDI: PromptSet = PromptSet {
    intro: "नमस्ते! मैं आपकी जानकारी जमा करने में मदद करने के लिए यहां हूं। \
            आप अपने उत्तर बोल या टाइप कर सकते हैं। आइए आपके नाम से शुरू करें।",
    ask_name: "आपका नाम क्या है?",
    ask_phone: "बहुत अच्छा! अब, आपका फ़ोन नंबर क्या है?",
    ask_email: "धन्यवाद! आपका ईमेल पता क्या है?",
    ask_message: "लगभग हो गया! कृपया संक्षेप में बताएं कि आपको किस विषय में मदद चाहिए।",
    confirm: "यहां वह जानकारी है जो मैंने एकत्र की है। क्या यह सही है?",
    complete: "धन्यवाद! आपकी जानकारी सफलतापूर्वक जमा कर दी गई है।",
    invalid_phone: "कृपया एक वैध 10-अंकों का फोन नंबर दर्ज करें",
    invalid_email: "कृपया एक वैध ईमेल पता दर्ज करें",
};

static TAMIL: PromptSet = PromptSet {
    intro: "வணக்கம்! உங்கள் தகவலை சமர்ப்பிக்க உதவ நான் இங்கே இருக்கிறேன். \
            நீங்கள் பேசலாம் அல்லது உங்கள் பதில்களை தட்டச்சு செய்யலாம். உங்கள் பெயரில் தொடங்குவோம்.",
    ask_name: "உங்கள் பெயர் என்ன?",
    ask_phone: "நன்று! இப்போது, உங்கள் தொலைபேசி எண் என்ன?",
    ask_email: "நன்றி! உங்கள் மின்னஞ்சல் முகவரி என்ன?",
    ask_message: "கிட்டத்தட்ட முடிந்தது! உங்களுக்கு எந்த விஷயத்தில் உதவி தேவை என்பதைப் பற்றிய சிறிய செய்தியைப் பகிரவும்.",
    confirm: "நான் சேகரித்த தகவல் இதோ. இது சரியா?",
    complete: "நன்றி! உங்கள் தகவல் வெற்றிகரமாக சமர்ப்பிக்கப்பட்டது.",
    invalid_phone: "சரியான 10-இலக்க தொலைபேசி எண்ணை உள்ளிடவும்",
    invalid_email: "சரியான மின்னஞ்சல் முகவரியை உள்ளிடவும்",
};

static TELUGU: PromptSet = PromptSet {
    intro: "నమస్కారం! మీ సమాచారాన్ని సమర్పించడంలో సహాయపడటానికి నేను ఇక్కడ ఉన్నాను. \
            మీరు మీ సమాధానాలను మాట్లాడవచ్చు లేదా టైప్ చేయవచ్చు. మీ పేరుతో ప్రారంభిద్దాం.",
    ask_name: "మీ పేరు ఏమిటి?",
    ask_phone: "చాలా బాగుంది! ఇప్పుడు, మీ ఫోన్ నంబర్ ఏమిటి?",
    ask_email: "ధన్యవాదాలు! మీ ఇమెయిల్ చిరునామా ఏమిటి?",
    ask_message: "దాదాపు పూర్తయింది! మీకు ఏ విషయంలో సహాయం కావాలో కుదించి చెప్పండి.",
    confirm: "నేను సేకరించిన సమాచారం ఇదిగో. ఇది సరియైనదేనా?",
    complete: "ధన్యవాదాలు! మీ సమాచారం విజయవంతంగా సమర్పించబడింది.",
    invalid_phone: "దయచేసి చెల్లుబాటు అయ్యే 10-అంకెల ఫోన్ నంబర్‌ను నమోదు చేయండి",
    invalid_email: "దయచేసి చెల్లుబాటు అయ్యే ఇమెయిల్ చిరునామాను నమోదు చేయండి",
};

static BENGALI: PromptSet = PromptSet {
    intro: "হ্যালো! আমি আপনার তথ্য জমা দিতে সাহায্য করতে এখানে আছি। \
            আপনি আপনার উত্তরগুলি বলতে বা টাইপ করতে পারেন। আসুন আপনার নাম দিয়ে শুরু করি।",
    ask_name: "আপনার নাম কী?",
    ask_phone: "দারুণ! এখন, আপনার ফোন নম্বর কী?",
    ask_email: "ধন্যবাদ! আপনার ইমেইল ঠিকানা কী?",
    ask_message: "প্রায় শেষ! আপনি কোন বিষয়ে সাহায্য চান তা সংক্ষেপে জানান।",
    confirm: "এই তথ্যগুলি আমি সংগ্রহ করেছি। এটা কি সঠিক?",
    complete: "ধন্যবাদ! আপনার তথ্য সফলভাবে জমা দেওয়া হয়েছে।",
    invalid_phone: "অনুগ্রহ করে একটি বৈধ 10-ডিজিটের ফোন নম্বর লিখুন",
    invalid_email: "অনুগ্রহ করে একটি বৈধ ইমেল ঠিকানা লিখুন",
};

fn translated_set(language: Language) -> Option<&'static PromptSet> {
    match language {
        Language::English => Some(&ENGLISH),
        Language::Hindi => Some(&HINDI),
        Language::Tamil => Some(&TAMIL),
        Language::Telugu => Some(&TELUGU),
        Language::Bengali => Some(&BENGALI),
        _ => None,
    }
}

/// Look up a prompt, falling back to English when the locale has no
/// translated set.
pub fn prompt(language: Language, key: PromptKey) -> &'static str {
    translated_set(language).unwrap_or(&ENGLISH).get(key)
}

// Curated affirmative tokens. English is always consulted in addition
// to the active language, since recognition often returns English
// tokens regardless of the UI locale.
static AFFIRMATIVE_EN: &[&str] = &["yes", "yeah", "sure", "ok", "okay", "confirm", "submit"];
static AFFIRMATIVE_HI: &[&str] = &["हां", "हाँ", "जी हां", "ठीक है", "हो", "सही", "बिलकुल"];
static AFFIRMATIVE_TA: &[&str] = &["ஆம்", "சரி", "ஓகே", "ஆமாம்"];
static AFFIRMATIVE_TE: &[&str] = &["అవును", "సరే", "ఓకే"];
static AFFIRMATIVE_BN: &[&str] = &["হ্যাঁ", "ঠিক আছে", "অবশ্যই"];

fn affirmative_tokens(language: Language) -> &'static [&'static str] {
    match language {
        Language::Hindi => AFFIRMATIVE_HI,
        Language::Tamil => AFFIRMATIVE_TA,
        Language::Telugu => AFFIRMATIVE_TE,
        Language::Bengali => AFFIRMATIVE_BN,
        _ => &[],
    }
}

/// Whether an input counts as a "yes" on the confirm step.
///
/// Case-insensitive substring match against the active language's token
/// list plus the English list. Deliberately a heuristic: "yes but..."
/// is treated as affirmative because a token substring matches.
pub fn is_affirmative(input: &str, language: Language) -> bool {
    let lowered = input.to_lowercase();
    affirmative_tokens(language)
        .iter()
        .chain(AFFIRMATIVE_EN.iter())
        .any(|token| lowered.contains(&token.to_lowercase()))
}
