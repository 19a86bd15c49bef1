// Fixed answer texts for the rule-based responder.
// Everything here is static; knowledge-driven rendering lives in formatter.rs.

use serde::{Deserialize, Serialize};

/// Flavor of learning roadmap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadmapFocus {
    MachineLearning,
    Nlp,
    FullStack,
    #[default]
    General,
}

impl RoadmapFocus {
    /// Maps a focus name (`ml`, `nlp`, `fullstack`) to a flavor; anything else is general.
    pub fn parse(focus: &str) -> Self {
        match focus.trim().to_lowercase().as_str() {
            "ml" => RoadmapFocus::MachineLearning,
            "nlp" => RoadmapFocus::Nlp,
            "fullstack" => RoadmapFocus::FullStack,
            _ => RoadmapFocus::General,
        }
    }

    pub fn roadmap(self) -> &'static str {
        match self {
            RoadmapFocus::MachineLearning => ML_ROADMAP,
            RoadmapFocus::Nlp => NLP_ROADMAP,
            RoadmapFocus::FullStack => FULLSTACK_ROADMAP,
            RoadmapFocus::General => GENERAL_ROADMAP,
        }
    }
}

pub const ML_ROADMAP: &str = "**Machine Learning Roadmap:**\n\n\
1. **Foundation** – Linear Algebra, Calculus, Statistics\n\
2. **ML Basics** – Supervised/Unsupervised Learning, Regression, Classification\n\
3. **Advanced ML** – Ensemble Methods, Feature Engineering, Hyperparameter Tuning\n\
4. **Deep Learning** – Neural Networks, CNNs, RNNs, Transformers\n\
5. **Specializations** – NLP, Computer Vision, Reinforcement Learning\n\
6. **Production ML** – Model Deployment, MLOps, Monitoring\n\
7. **Advanced Topics** – Federated Learning, Transfer Learning, Meta-Learning";

pub const NLP_ROADMAP: &str = "**NLP Learning Roadmap:**\n\n\
1. **Basics** – Text preprocessing, Tokenization, Stemming, Lemmatization\n\
2. **Traditional NLP** – TF-IDF, Bag of Words, N-grams\n\
3. **Word Embeddings** – Word2Vec, GloVe, FastText\n\
4. **Deep Learning** – RNNs, LSTMs, GRUs\n\
5. **Transformers** – BERT, GPT, Attention Mechanisms\n\
6. **Advanced** – Fine-tuning, Transfer Learning, Few-shot Learning\n\
7. **Applications** – Chatbots, Machine Translation, Question Answering";

pub const FULLSTACK_ROADMAP: &str = "**Full-Stack Development Roadmap:**\n\n\
1. **Frontend** – HTML/CSS, JavaScript, React Advanced Patterns\n\
2. **Backend** – Node.js, Express, REST APIs, Authentication\n\
3. **Databases** – MongoDB, PostgreSQL, Query Optimization\n\
4. **DevOps** – Docker, Kubernetes, CI/CD\n\
5. **Cloud** – AWS, GCP, or Azure Deployment\n\
6. **Testing** – Unit Testing, Integration Testing, E2E Testing\n\
7. **System Design** – Scalability, Caching, Microservices";

pub const GENERAL_ROADMAP: &str = "**Overall Development Roadmap:**\n\n\
**Current Strengths:**\n\
• ML/AI fundamentals and projects\n\
• Full-stack web development\n\
• Data analysis and preprocessing\n\n\
**Next Steps:**\n\
1. **Deepen ML Expertise** – Advanced algorithms, model deployment\n\
2. **NLP Specialization** – Transformers, pre-trained models\n\
3. **Cloud & DevOps** – Deploy models, CI/CD pipelines\n\
4. **System Design** – Build scalable systems\n\
5. **Contribute to Open Source** – Real-world impact\n\
6. **Technical Writing** – Share knowledge, build personal brand";

/// Curated improvement suggestions, keyed by exact project name.
const CURATED_IMPROVEMENTS: &[(&str, [&str; 4])] = &[
    (
        "SmartLeaf",
        [
            "Add model explainability using SHAP or LIME",
            "Implement mobile app for easier access",
            "Create API for integration with agriculture platforms",
            "Add multi-language support for global farmers",
        ],
    ),
    (
        "BreatheEasy",
        [
            "Implement real-time notifications for pollution spikes",
            "Add historical data visualization and trend analysis",
            "Integrate with wearable devices for health metrics",
            "Create a mobile app for on-the-go monitoring",
        ],
    ),
    (
        "Student Management System",
        [
            "Add automated email notifications for alerts",
            "Implement parent portal for progress tracking",
            "Create export functionality (PDF reports)",
            "Add advanced analytics and predictive insights",
        ],
    ),
    (
        "Movie Recommendation System",
        [
            "Integrate with real streaming APIs (TMDB, IMDb)",
            "Add social features (friend recommendations, ratings)",
            "Implement A/B testing for algorithm optimization",
            "Create visualization of recommendation reasoning",
        ],
    ),
    (
        "Smart Grocery AI",
        [
            "Add price comparison across multiple stores",
            "Implement barcode scanning for quick shopping",
            "Create loyalty program integration",
            "Add nutritional analysis and dietary preferences",
        ],
    ),
];

pub const DEFAULT_IMPROVEMENTS: [&str; 4] = [
    "Write comprehensive documentation",
    "Add automated testing",
    "Deploy to cloud platform",
    "Create CI/CD pipeline",
];

/// Suggestions for a project name, falling back to the generic list.
pub fn improvements_for(project_name: &str) -> &'static [&'static str; 4] {
    CURATED_IMPROVEMENTS
        .iter()
        .find(|(name, _)| *name == project_name)
        .map(|(_, items)| items)
        .unwrap_or(&DEFAULT_IMPROVEMENTS)
}

pub const NEW_PROJECT_IDEAS: &str = "**Suggested Project Ideas:**\n\n\
1. **Healthcare Chatbot with ML** – Build an AI-powered chatbot using NLP and ML to provide health recommendations. Combine TensorFlow, Node.js, and MongoDB.\n\n\
2. **Stock Market Predictor** – Predict stock prices using LSTM neural networks and real-time data. Display predictions in a React dashboard.\n\n\
3. **Face Recognition Attendance System** – Use CNN for face detection and recognition. Integrate with the Student Management System for automated attendance.\n\n\
4. **E-commerce Recommendation Engine** – Build an advanced system combining content-based and collaborative filtering with personalization.\n\n\
5. **Weather Forecasting with ML** – Use historical weather data and deep learning to improve weather predictions.\n\n\
6. **Smart Crop Yield Predictor** – Combine SmartLeaf data with soil, weather, and other factors to predict crop yields.\n\n\
7. **Real-time Traffic Analyzer** – Analyze traffic patterns and suggest optimal routes using computer vision and ML.";

pub const CAREER_RATIONALE: &str = "\n**Why these paths?**\n\n\
These roles combine your strengths in ML, data science, and full-stack development. \
You can specialize in any direction based on your interests and the projects demonstrate \
readiness for professional roles.";

/// Body of the recruiter pitch. The greeting line with the developer's name is prepended.
pub const RECRUITER_PITCH_BODY: &str = "I'm an ML/AI student and full-stack developer passionate about building intelligent applications. \
I've completed 5 production-level projects spanning computer vision, recommendation systems, \
full-stack web development, and data science.\n\n\
**What I bring:**\n\
• Strong ML/AI foundation with TensorFlow, Keras, and scikit-learn\n\
• Full-stack development skills (React, Node.js, databases)\n\
• Experience with real-world problems (agriculture, health, e-commerce)\n\
• Clean code, version control, and collaborative development\n\n\
**Why I'm a great fit:**\n\
My projects show I can take complex problems and deliver working solutions. \
I'm eager to learn, adapt quickly, and contribute meaningfully to your team. \
Whether it's building ML pipelines, web apps, or data solutions, I'm ready to make an impact.";

pub const AI_ML_PROFILE: &str = "**AI/ML Specialist Profile:**\n\n\
**Deep Learning Projects:**\n\
• SmartLeaf (CNN-based plant disease detection)\n\
• Movie Recommendation System (Collaborative filtering + NLP)\n\
• Smart Grocery AI (Hybrid recommendation engine)\n\n\
**Technical Competencies:**\n\
• CNNs, RNNs, Neural Network Architecture\n\
• Recommendation Systems & Algorithms\n\
• NLP & Sentiment Analysis\n\
• Data Preprocessing & Feature Engineering\n\
• Model Evaluation & Optimization\n\n\
**Tools & Frameworks:**\n\
TensorFlow, Keras, Scikit-Learn, Pandas, Numpy\n\n\
**Ready For:**\n\
ML Engineer, Data Scientist, AI Research, Computer Vision roles";

pub const FULLSTACK_PROFILE: &str = "**Full-Stack Developer Profile:**\n\n\
**Completed Projects:**\n\
• BreatheEasy (React + Node.js + MongoDB with real-time data)\n\
• Student Management System (CRUD operations, authentication, analytics)\n\n\
**Frontend Skills:**\n\
React, HTML5, CSS3, Tailwind CSS, Responsive Design\n\n\
**Backend Skills:**\n\
Node.js, Express, RESTful APIs, Authentication, Database Design\n\n\
**Database Expertise:**\n\
MongoDB (NoSQL), PostgreSQL (SQL), Data Modeling\n\n\
**Development Practices:**\n\
Git version control, clean code, component architecture, API design\n\n\
**Ready For:**\n\
Full-Stack Developer, Backend Engineer, Frontend Engineer, Web Developer roles";

pub const FALLBACK_ANSWER: &str = "I'm not sure how to answer that. Try asking me about:\n\n\
• My background and skills\n\
• My projects and tech stack\n\
• Project-specific improvements\n\
• Learning roadmaps\n\
• Career interests\n\
• AI/ML or Full-Stack expertise\n\n\
Feel free to rephrase your question!";

pub const TECH_STACK_CLARIFICATION: &str = "Please specify which project you'd like to know about.";

pub const IMPROVEMENT_CLARIFICATION: &str = "Please specify which project you'd like suggestions for.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roadmap_focus_parse() {
        assert_eq!(RoadmapFocus::parse("ml"), RoadmapFocus::MachineLearning);
        assert_eq!(RoadmapFocus::parse("NLP"), RoadmapFocus::Nlp);
        assert_eq!(RoadmapFocus::parse(" fullstack "), RoadmapFocus::FullStack);
        assert_eq!(RoadmapFocus::parse("devops"), RoadmapFocus::General);
        assert_eq!(RoadmapFocus::default(), RoadmapFocus::General);
    }

    #[test]
    fn test_each_focus_has_distinct_roadmap() {
        assert!(RoadmapFocus::Nlp.roadmap().starts_with("**NLP Learning Roadmap:**"));
        assert!(RoadmapFocus::General.roadmap().starts_with("**Overall Development Roadmap:**"));
        assert_ne!(
            RoadmapFocus::MachineLearning.roadmap(),
            RoadmapFocus::FullStack.roadmap()
        );
    }

    #[test]
    fn test_curated_improvements_are_exact_name_matches() {
        assert_eq!(improvements_for("SmartLeaf")[0], "Add model explainability using SHAP or LIME");
        assert_eq!(improvements_for("smartleaf"), &DEFAULT_IMPROVEMENTS);
        assert_eq!(improvements_for("Unknown Project"), &DEFAULT_IMPROVEMENTS);
    }

    #[test]
    fn test_roadmap_text_keeps_line_structure() {
        assert!(ML_ROADMAP.contains("\n1. **Foundation**"));
        assert!(GENERAL_ROADMAP.contains("**Next Steps:**\n1."));
    }
}
