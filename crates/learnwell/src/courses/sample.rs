use super::domain::{Course, CourseId, Instructor, Price};

struct Entry {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    instructor: (&'static str, f64, u32),
    level: &'static str,
    difficulty: &'static str,
    department: &'static str,
    tags: &'static [&'static str],
    learning_style: &'static [&'static str],
    price: f64,
    hours_per_week: f64,
    duration_weeks: u32,
    rating: (f64, u64),
    format: &'static str,
    topics: &'static [&'static str],
    skills_gained: &'static [&'static str],
}

const ENTRIES: &[Entry] = &[
    Entry {
        id: "101",
        title: "Introduction to Programming with Python",
        description: "Learn variables, control flow and functions by building small tools.",
        instructor: ("Dr. Sarah Chen", 4.8, 12),
        level: "Beginner",
        difficulty: "easy",
        department: "Computer Science",
        tags: &["Programming", "Python", "Coding"],
        learning_style: &["visual", "kinesthetic"],
        price: 199.0,
        hours_per_week: 5.0,
        duration_weeks: 8,
        rating: (4.7, 1840),
        format: "Online",
        topics: &["Variables", "Loops", "Functions"],
        skills_gained: &["Python basics", "Problem solving"],
    },
    Entry {
        id: "102",
        title: "Foundations of Artificial Intelligence",
        description: "A gentle tour of search, reasoning and machine learning ideas.",
        instructor: ("Prof. Daniel Okoye", 4.9, 15),
        level: "Beginner",
        difficulty: "easy",
        department: "Artificial Intelligence",
        tags: &["AI", "ML", "Neural Networks"],
        learning_style: &["visual", "reading/writing"],
        price: 349.0,
        hours_per_week: 6.0,
        duration_weeks: 10,
        rating: (4.8, 2210),
        format: "Online",
        topics: &["Search", "Classification", "Ethics"],
        skills_gained: &["Model intuition", "AI literacy"],
    },
    Entry {
        id: "103",
        title: "Applied Machine Learning",
        description: "Train, evaluate and deploy supervised models on real datasets.",
        instructor: ("Dr. Priya Raman", 4.6, 9),
        level: "Intermediate",
        difficulty: "medium",
        department: "Data Science",
        tags: &["Machine Learning", "Python", "Statistics"],
        learning_style: &["kinesthetic", "reading/writing"],
        price: 549.0,
        hours_per_week: 8.0,
        duration_weeks: 12,
        rating: (4.6, 960),
        format: "Hybrid",
        topics: &["Regression", "Trees", "Model evaluation"],
        skills_gained: &["scikit-learn", "Feature engineering"],
    },
    Entry {
        id: "104",
        title: "Deep Learning Systems",
        description: "Build and tune deep networks for vision and language tasks.",
        instructor: ("Dr. Marcus Liu", 4.7, 11),
        level: "Advanced",
        difficulty: "hard",
        department: "Artificial Intelligence",
        tags: &["AI", "Deep Learning", "GPU"],
        learning_style: &["visual", "kinesthetic"],
        price: 899.0,
        hours_per_week: 12.0,
        duration_weeks: 14,
        rating: (4.7, 640),
        format: "Online",
        topics: &["CNNs", "Transformers", "Optimization"],
        skills_gained: &["PyTorch", "Model tuning"],
    },
    Entry {
        id: "105",
        title: "Mindful Leadership",
        description: "Lead teams with focus, empathy and sustainable habits.",
        instructor: ("Amara Johnson", 4.5, 7),
        level: "Intermediate",
        difficulty: "easy",
        department: "Business",
        tags: &["Leadership", "Mindfulness", "Management"],
        learning_style: &["auditory", "reading/writing"],
        price: 299.0,
        hours_per_week: 3.0,
        duration_weeks: 6,
        rating: (4.4, 410),
        format: "Online",
        topics: &["Self-awareness", "Feedback", "Resilience"],
        skills_gained: &["Coaching", "Stress management"],
    },
    Entry {
        id: "106",
        title: "Watercolor Landscapes",
        description: "Layering, washes and composition for outdoor painting.",
        instructor: ("Elena Rossi", 4.9, 20),
        level: "Beginner",
        difficulty: "medium",
        department: "Fine Arts",
        tags: &["Painting", "Art", "Design"],
        learning_style: &["visual", "kinesthetic"],
        price: 149.0,
        hours_per_week: 4.0,
        duration_weeks: 6,
        rating: (4.9, 530),
        format: "In-person",
        topics: &["Washes", "Color theory", "Composition"],
        skills_gained: &["Watercolor technique"],
    },
    Entry {
        id: "107",
        title: "Conversational Spanish",
        description: "Everyday speaking practice with native-speaker sessions.",
        instructor: ("Luis Fernández", 4.6, 10),
        level: "Beginner",
        difficulty: "easy",
        department: "Languages",
        tags: &["Spanish", "Languages", "Speaking"],
        learning_style: &["auditory", "kinesthetic"],
        price: 249.0,
        hours_per_week: 4.0,
        duration_weeks: 10,
        rating: (4.5, 1200),
        format: "Online",
        topics: &["Greetings", "Travel", "Small talk"],
        skills_gained: &["Spoken Spanish"],
    },
    Entry {
        id: "108",
        title: "Cognitive Psychology",
        description: "How memory, attention and perception shape learning.",
        instructor: ("Dr. Hannah Weiss", 4.7, 14),
        level: "Intermediate",
        difficulty: "medium",
        department: "Psychology",
        tags: &["Psychology", "Memory", "Learning Science"],
        learning_style: &["reading/writing", "auditory"],
        price: 429.0,
        hours_per_week: 6.0,
        duration_weeks: 12,
        rating: (4.6, 780),
        format: "Hybrid",
        topics: &["Attention", "Memory", "Perception"],
        skills_gained: &["Study strategy design"],
    },
    Entry {
        id: "109",
        title: "Quantitative Finance",
        description: "Pricing models, risk and portfolio construction.",
        instructor: ("Dr. Robert Adeyemi", 4.4, 18),
        level: "Advanced",
        difficulty: "hard",
        department: "Finance",
        tags: &["Finance", "Statistics", "Investing"],
        learning_style: &["reading/writing"],
        price: 1199.0,
        hours_per_week: 10.0,
        duration_weeks: 16,
        rating: (4.3, 310),
        format: "Online",
        topics: &["Options", "Risk", "Portfolios"],
        skills_gained: &["Financial modeling"],
    },
    Entry {
        id: "110",
        title: "Climate and Ecosystems",
        description: "Field-informed introduction to climate science and ecology.",
        instructor: ("Dr. Maya Thompson", 4.8, 13),
        level: "Beginner",
        difficulty: "medium",
        department: "Environmental Studies",
        tags: &["Climate", "Sustainability", "Ecology"],
        learning_style: &["visual", "auditory"],
        price: 0.0,
        hours_per_week: 3.0,
        duration_weeks: 8,
        rating: (4.7, 2650),
        format: "Online",
        topics: &["Carbon cycle", "Biodiversity"],
        skills_gained: &["Environmental literacy"],
    },
    Entry {
        id: "111",
        title: "Music Theory and Composition",
        description: "Harmony, rhythm and songwriting from first principles.",
        instructor: ("Jonah Brooks", 4.6, 16),
        level: "Intermediate",
        difficulty: "medium",
        department: "Music",
        tags: &["Music", "Composition", "Harmony"],
        learning_style: &["auditory", "kinesthetic"],
        price: 699.0,
        hours_per_week: 5.0,
        duration_weeks: 10,
        rating: (4.5, 450),
        format: "Online",
        topics: &["Scales", "Chords", "Form"],
        skills_gained: &["Songwriting"],
    },
    Entry {
        id: "112",
        title: "Ethics of Technology",
        description: "Philosophical tools for reasoning about AI, privacy and power.",
        instructor: ("Prof. Ines Moreau", 4.7, 22),
        level: "Advanced",
        difficulty: "medium",
        department: "Philosophy",
        tags: &["Philosophy", "Ethics", "AI"],
        learning_style: &["reading/writing", "auditory"],
        price: 749.0,
        hours_per_week: 4.0,
        duration_weeks: 8,
        rating: (4.8, 290),
        format: "Seminar",
        topics: &["Privacy", "Fairness", "Autonomy"],
        skills_gained: &["Ethical analysis"],
    },
];

pub(crate) fn courses() -> Vec<Course> {
    ENTRIES.iter().map(Entry::to_course).collect()
}

impl Entry {
    fn to_course(&self) -> Course {
        let (instructor, instructor_rating, years_teaching) = self.instructor;
        Course {
            course_id: CourseId::from(self.id),
            title: self.title.to_string(),
            description: self.description.to_string(),
            instructor: Instructor {
                name: instructor.to_string(),
                rating: instructor_rating,
                years_teaching,
            },
            level: self.level.to_string(),
            difficulty: self.difficulty.to_string(),
            department: self.department.to_string(),
            tags: owned(self.tags),
            learning_style: owned(self.learning_style),
            price: Price {
                amount: self.price,
                currency: "USD".to_string(),
            },
            hours_per_week: self.hours_per_week,
            duration_weeks: self.duration_weeks,
            rating: self.rating.0,
            total_ratings: self.rating.1,
            language: "English".to_string(),
            format: self.format.to_string(),
            topics: owned(self.topics),
            skills_gained: owned(self.skills_gained),
        }
    }
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
