// ============================================================
// Layer 4: Built-in Sample Corpus
// ============================================================
// Twenty hand-labelled health questions in six categories.
// `medibot train` uses these when no CSV file is given, so a
// fresh checkout can produce a working model in one command.

use crate::data::normalizer::Normalizer;
use crate::domain::training_example::{CategoryMapping, TrainingExample};
use crate::domain::traits::CorpusSource;
use crate::error::Result;

const CATEGORIES: [&str; 6] = [
    "respiratory",
    "pain_and_fever",
    "emergency",
    "conditions",
    "first_aid",
    "wellness",
];

const EXAMPLES: [(&str, &str, usize); 20] = [
    ("What are the symptoms of a cold?",
     "Common cold symptoms include runny nose, sore throat, coughing, and mild fever. Rest and fluids are recommended.", 0),
    ("How do I know if I have the flu?",
     "Flu symptoms include high fever, body aches, fatigue, and respiratory symptoms. They typically come on suddenly.", 0),
    ("What should I do for a headache?",
     "For a headache, try resting in a dark room, staying hydrated, and taking over-the-counter pain relievers if needed.", 1),
    ("How can I treat a fever?",
     "For a fever, stay hydrated, rest, and take fever-reducing medication if necessary. Consult a doctor if the fever is high or persistent.", 1),
    ("What are the signs of a heart attack?",
     "Heart attack signs include chest pain/pressure, pain radiating to arm/jaw, shortness of breath, and cold sweats. Seek emergency help immediately.", 2),
    ("How do I perform CPR?",
     "For CPR, push hard and fast on the center of the chest at a rate of 100-120 compressions per minute. Call emergency services first.", 2),
    ("What are the symptoms of diabetes?",
     "Diabetes symptoms include increased thirst/urination, unexplained weight loss, fatigue, and blurred vision.", 3),
    ("How can I prevent getting sick?",
     "Prevent illness by washing hands frequently, avoiding close contact with sick people, and maintaining a healthy lifestyle.", 3),
    ("What should I do for a sprained ankle?",
     "For a sprained ankle, remember RICE: Rest, Ice, Compression, and Elevation. Avoid putting weight on it initially.", 4),
    ("How do I treat a burn?",
     "For burns, cool the area with running water, don't use ice, and don't pop blisters. Seek medical help for severe burns.", 4),
    ("What are the symptoms of COVID-19?",
     "COVID-19 symptoms include fever, cough, shortness of breath, fatigue, and loss of taste or smell.", 0),
    ("How do I check my blood pressure?",
     "To check blood pressure, use a home monitor or visit a pharmacy. Sit quietly for 5 minutes before measuring.", 5),
    ("What are the signs of a stroke?",
     "Stroke signs can be remembered with FAST: Face drooping, Arm weakness, Speech difficulty, Time to call emergency services.", 2),
    ("How much water should I drink daily?",
     "Most adults should drink about 8 cups (64 ounces) of water daily, but needs vary based on activity level and climate.", 5),
    ("What are the benefits of exercise?",
     "Regular exercise improves cardiovascular health, strengthens muscles, enhances mood, and helps maintain a healthy weight.", 5),
    ("How can I improve my sleep?",
     "Improve sleep by maintaining a regular schedule, creating a restful environment, limiting screen time before bed, and avoiding caffeine late in the day.", 5),
    ("What are the symptoms of allergies?",
     "Allergy symptoms include sneezing, itchy eyes/nose/throat, runny nose, and congestion. Antihistamines can help manage symptoms.", 3),
    ("How do I treat a sunburn?",
     "For sunburn, cool the skin with cold compresses, apply aloe vera, stay hydrated, and avoid further sun exposure.", 4),
    ("What should I eat for a healthy diet?",
     "A healthy diet includes plenty of fruits, vegetables, whole grains, lean proteins, and limited processed foods and added sugars.", 5),
    ("How do I manage stress?",
     "Manage stress through regular exercise, adequate sleep, relaxation techniques like deep breathing or meditation, and maintaining social connections.", 5),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct SampleCorpus;

impl SampleCorpus {
    pub fn categories() -> CategoryMapping {
        let mut mapping = CategoryMapping::new();
        for name in CATEGORIES {
            mapping.id_for(name);
        }
        mapping
    }
}

impl CorpusSource for SampleCorpus {
    fn load_all(&self) -> Result<Vec<TrainingExample>> {
        let normalizer = Normalizer::new();
        Ok(EXAMPLES
            .iter()
            .map(|(q, a, label)| TrainingExample::new(normalizer.normalize(q), *a, *label))
            .collect())
    }
}
