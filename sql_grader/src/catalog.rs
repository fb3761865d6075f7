use common::models::ExerciseData;
use std::collections::HashMap;
use std::path::Path;

/// The exercise catalog. Built once at startup and read-only afterwards;
/// requests only ever look exercises up by id.
#[derive(Debug, Clone)]
pub struct Catalog {
    exercises: HashMap<String, ExerciseData>,
}

impl Catalog {
    /// The built-in catalog used when no catalog file is configured.
    pub fn builtin() -> Self {
        let mut exercises = HashMap::new();
        exercises.insert(
            "ex1".to_string(),
            ExerciseData {
                prompt: "Write a SQL query that returns the customers with more than 5 orders in 2024".to_string(),
                correction_guidelines: "The query must:\n\
                    1. Join the customers and orders tables\n\
                    2. Filter on the year 2024\n\
                    3. Group by customer\n\
                    4. Filter with HAVING COUNT > 5\n\
                    5. Select only last and first name"
                    .to_string(),
                model_answers: vec![
                    "SELECT c.nom, c.prenom FROM clients c JOIN commandes cmd ON c.id = cmd.client_id WHERE YEAR(cmd.date_commande) = 2024 GROUP BY c.id HAVING COUNT(cmd.id) > 5;".to_string(),
                ],
            },
        );
        Catalog { exercises }
    }

    /// Loads a catalog from a JSON file mapping exercise ids to exercises.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        let exercises = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        Ok(Catalog { exercises })
    }

    pub fn get(&self, exercise_id: &str) -> Option<&ExerciseData> {
        self.exercises.get(exercise_id)
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }
}
