pub struct FallbackEntry {
    pub question: &'static str,
    pub options: [&'static str; 4],
    pub correct_answer: usize,
    pub explanation: &'static str,
}

pub struct FallbackCategory {
    pub name: &'static str,
    pub questions: &'static [FallbackEntry],
}

pub const DEFAULT_CATEGORY: &str = "science";

// Matched in order; the first category named in the topic wins.
pub static FALLBACK_BANK: &[FallbackCategory] = &[
    FallbackCategory {
        name: "science",
        questions: &[
            FallbackEntry {
                question: "What is the chemical symbol for oxygen?",
                options: ["O", "Ox", "O2", "Oxy"],
                correct_answer: 0,
                explanation: "O is the chemical symbol for oxygen.",
            },
            FallbackEntry {
                question: "Which planet is closest to the Sun?",
                options: ["Venus", "Mercury", "Earth", "Mars"],
                correct_answer: 1,
                explanation: "Mercury is the closest planet to the Sun.",
            },
            FallbackEntry {
                question: "What is the largest organ in the human body?",
                options: ["Heart", "Brain", "Liver", "Skin"],
                correct_answer: 3,
                explanation: "The skin is the largest organ in the human body.",
            },
        ],
    },
    FallbackCategory {
        name: "history",
        questions: &[
            FallbackEntry {
                question: "In what year did World War II end?",
                options: ["1943", "1944", "1945", "1946"],
                correct_answer: 2,
                explanation: "World War II ended in 1945.",
            },
            FallbackEntry {
                question: "Who was the first President of the United States?",
                options: [
                    "Thomas Jefferson",
                    "John Adams",
                    "George Washington",
                    "Benjamin Franklin",
                ],
                correct_answer: 2,
                explanation: "George Washington was the first President of the United States.",
            },
            FallbackEntry {
                question: "In what year did Columbus first reach the Americas?",
                options: ["1490", "1491", "1492", "1493"],
                correct_answer: 2,
                explanation: "Columbus first reached the Americas in 1492.",
            },
        ],
    },
    FallbackCategory {
        name: "geography",
        questions: &[
            FallbackEntry {
                question: "What is the capital of Japan?",
                options: ["Tokyo", "Kyoto", "Osaka", "Yokohama"],
                correct_answer: 0,
                explanation: "Tokyo is the capital of Japan.",
            },
            FallbackEntry {
                question: "Which is the largest country in South America?",
                options: ["Argentina", "Brazil", "Peru", "Colombia"],
                correct_answer: 1,
                explanation: "Brazil is the largest country in South America.",
            },
            FallbackEntry {
                question: "What is the longest river in the world?",
                options: ["Amazon", "Nile", "Yangtze", "Mississippi"],
                correct_answer: 1,
                explanation: "The Nile is usually cited as the longest river in the world.",
            },
        ],
    },
    FallbackCategory {
        name: "math",
        questions: &[
            FallbackEntry {
                question: "What is 15 + 27?",
                options: ["40", "41", "42", "43"],
                correct_answer: 2,
                explanation: "15 + 27 = 42",
            },
            FallbackEntry {
                question: "What is the square root of 81?",
                options: ["7", "8", "9", "10"],
                correct_answer: 2,
                explanation: "The square root of 81 is 9.",
            },
            FallbackEntry {
                question: "How many sides does a hexagon have?",
                options: ["5", "6", "7", "8"],
                correct_answer: 1,
                explanation: "A hexagon has 6 sides.",
            },
        ],
    },
];
