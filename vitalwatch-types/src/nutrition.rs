//! Staple-food recommendations and the meal catalog.
//!
//! Both tables are static. Every child gets the base staples, and older
//! infants get the additional iron and vitamin A sources once they can take
//! them. The meal catalog is browsed with a [`MealFilter`] on age group and
//! meal time.

/// How strongly a food is recommended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Priority {
    High,
    Medium,
}

impl Priority {
    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
        }
    }
}

/// A recommended local staple food.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FoodRecommendation {
    pub food: &'static str,
    pub local_name: &'static str,
    pub portion: &'static str,
    pub timing: &'static str,
    pub benefits: &'static [&'static str],
    pub priority: Priority,
    pub description: &'static str,
    pub health_benefits: &'static str,
    /// Minimum age in months at which this food is recommended.
    pub min_age_months: u32,
}

const STAPLES: [FoodRecommendation; 5] = [
    FoodRecommendation {
        food: "Maize Porridge",
        local_name: "Posho/Ugali",
        portion: "3-4 tablespoons",
        timing: "Morning & Evening",
        benefits: &["Energy", "B-Vitamins"],
        priority: Priority::High,
        description: "A warm, nutritious porridge made from ground maize, perfect for growing children.",
        health_benefits: "Rich in carbohydrates for energy, B-vitamins for brain development, and fiber for healthy digestion.",
        min_age_months: 0,
    },
    FoodRecommendation {
        food: "Sweet Potato",
        local_name: "Batata",
        portion: "2 tablespoons mashed",
        timing: "Lunch",
        benefits: &["Vitamin A", "Fiber", "Potassium"],
        priority: Priority::High,
        description: "Colorful and naturally sweet root vegetables that children love.",
        health_benefits: "Excellent source of Vitamin A for healthy vision, immune system support, and potassium for heart health.",
        min_age_months: 0,
    },
    FoodRecommendation {
        food: "Ground Nuts",
        local_name: "Peanuts",
        portion: "1 tablespoon paste",
        timing: "Snack",
        benefits: &["Protein", "Healthy Fats"],
        priority: Priority::Medium,
        description: "Protein-rich nuts ground into a smooth paste, perfect for snacks.",
        health_benefits: "High in protein for muscle development, healthy fats for brain growth, and essential amino acids.",
        min_age_months: 0,
    },
    FoodRecommendation {
        food: "Moringa Leaves",
        local_name: "Drumstick Tree",
        portion: "1 teaspoon powder",
        timing: "Mixed with porridge",
        benefits: &["Iron", "Vitamin C", "Protein"],
        priority: Priority::High,
        description: "Nutrient-dense leaves from the miracle tree, packed with vitamins and minerals.",
        health_benefits: "Contains 25x more iron than spinach, supports immune system and provides essential amino acids.",
        min_age_months: 6,
    },
    FoodRecommendation {
        food: "Palm Fruit",
        local_name: "Red Palm Oil",
        portion: "1/2 teaspoon",
        timing: "Added to vegetables",
        benefits: &["Vitamin A", "Healthy Fats"],
        priority: Priority::Medium,
        description: "Natural red oil rich in nutrients, perfect for cooking vegetables.",
        health_benefits: "High in Vitamin A and E, supports brain development and provides healthy fats for growth.",
        min_age_months: 9,
    },
];

/// Recommended staple foods for a child of the given age, in table order.
///
/// # Example
///
/// ```rust
/// use vitalwatch_types::nutrition::recommendations_for;
///
/// assert_eq!(recommendations_for(4.0).len(), 3);
/// assert_eq!(recommendations_for(10.0).len(), 5);
/// ```
pub fn recommendations_for(age_months: f64) -> Vec<&'static FoodRecommendation> {
    STAPLES
        .iter()
        .filter(|rec| age_months >= f64::from(rec.min_age_months))
        .collect()
}

/// When a meal is served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MealTime {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealTime {
    /// Every meal time in serving order.
    pub const ALL: [MealTime; 4] = [
        MealTime::Breakfast,
        MealTime::Lunch,
        MealTime::Dinner,
        MealTime::Snack,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MealTime::Breakfast => "Breakfast",
            MealTime::Lunch => "Lunch",
            MealTime::Dinner => "Dinner",
            MealTime::Snack => "Snack",
        }
    }
}

/// A prepared meal from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Meal {
    pub name: &'static str,
    pub local_name: &'static str,
    pub description: &'static str,
    pub health_benefits: &'static str,
    pub portion: &'static str,
    pub meal_time: MealTime,
    /// Youngest age in months the meal is suitable for.
    pub min_age_months: u32,
    pub priority: Priority,
    pub nutrients: &'static [&'static str],
    pub preparation_minutes: u32,
    pub calories_kcal: u32,
}

impl Meal {
    /// Age group label such as "6+ months".
    pub fn age_group(&self) -> String {
        format!("{}+ months", self.min_age_months)
    }

    /// True if a child of this age can have the meal.
    pub fn is_suitable_for(&self, age_months: f64) -> bool {
        age_months >= f64::from(self.min_age_months)
    }
}

/// The meal catalog, in display order.
pub const MEALS: [Meal; 6] = [
    Meal {
        name: "Maize Porridge",
        local_name: "Ugali wa Mahindi",
        description: "A warm, nutritious porridge made from ground maize flour, perfect for growing children.",
        health_benefits: "Rich in carbohydrates for energy, B-vitamins for brain development, and fiber for healthy digestion.",
        portion: "1/2 cup",
        meal_time: MealTime::Breakfast,
        min_age_months: 6,
        priority: Priority::High,
        nutrients: &["Carbohydrates", "Fiber", "Iron", "B-Vitamins"],
        preparation_minutes: 15,
        calories_kcal: 120,
    },
    Meal {
        name: "Sweet Potato Mash",
        local_name: "Viazi Vitamu",
        description: "Naturally sweet root vegetables mashed to an easy consistency.",
        health_benefits: "Vitamin A for healthy vision, immune support, and potassium for heart health.",
        portion: "1/3 cup",
        meal_time: MealTime::Lunch,
        min_age_months: 6,
        priority: Priority::High,
        nutrients: &["Vitamin A", "Potassium", "Fiber", "Vitamin C"],
        preparation_minutes: 20,
        calories_kcal: 85,
    },
    Meal {
        name: "Ground Nuts Paste",
        local_name: "Karanga",
        description: "Protein-rich nuts ground into a smooth paste for snacks or stirred into meals.",
        health_benefits: "Protein for muscle development, healthy fats for brain growth, and essential amino acids.",
        portion: "2 tablespoons",
        meal_time: MealTime::Snack,
        min_age_months: 8,
        priority: Priority::Medium,
        nutrients: &["Protein", "Healthy Fats", "Vitamin E", "Magnesium"],
        preparation_minutes: 5,
        calories_kcal: 180,
    },
    Meal {
        name: "Mixed Vegetable Stew",
        local_name: "Mchuzi wa Mboga",
        description: "Locally available vegetables cooked into a stew, introducing new flavors and textures.",
        health_benefits: "Vitamins, minerals and antioxidants from several vegetables support immunity and growth.",
        portion: "1/2 cup",
        meal_time: MealTime::Dinner,
        min_age_months: 8,
        priority: Priority::High,
        nutrients: &["Vitamins", "Minerals", "Antioxidants", "Fiber"],
        preparation_minutes: 25,
        calories_kcal: 95,
    },
    Meal {
        name: "Mashed Bananas",
        local_name: "Ndizi",
        description: "Soft bananas mashed smooth. A good first food and a quick energy source for toddlers.",
        health_benefits: "Natural sugars for quick energy, potassium for heart health, and vitamin B6 for brain development.",
        portion: "1/2 banana",
        meal_time: MealTime::Snack,
        min_age_months: 4,
        priority: Priority::Medium,
        nutrients: &["Potassium", "Vitamin B6", "Natural Sugars", "Vitamin C"],
        preparation_minutes: 2,
        calories_kcal: 60,
    },
    Meal {
        name: "Fish and Rice",
        local_name: "Samaki na Wali",
        description: "Fresh fish with rice, a complete protein with omega-3 fatty acids.",
        health_benefits: "Complete proteins for growth, omega-3 for brain development, and easy-to-digest carbohydrates.",
        portion: "1/3 cup",
        meal_time: MealTime::Lunch,
        min_age_months: 10,
        priority: Priority::High,
        nutrients: &["Protein", "Omega-3", "Carbohydrates", "Phosphorus"],
        preparation_minutes: 30,
        calories_kcal: 140,
    },
];

/// Age groups offered when filtering the catalog, in months.
pub const AGE_GROUPS: [u32; 3] = [4, 6, 8];

/// Catalog filter on age group and meal time. `None` matches everything.
///
/// An age group matches meals listed under exactly that group, so the
/// "6+ months" group does not include "4+ months" meals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MealFilter {
    pub age_group: Option<u32>,
    pub meal_time: Option<MealTime>,
}

impl MealFilter {
    pub fn matches(&self, meal: &Meal) -> bool {
        let age_match = self.age_group.is_none_or(|group| meal.min_age_months == group);
        let time_match = self.meal_time.is_none_or(|time| meal.meal_time == time);
        age_match && time_match
    }

    /// Step through all ages, then each entry of [`AGE_GROUPS`].
    pub fn cycle_age_group(&mut self) {
        self.age_group = match self.age_group {
            None => AGE_GROUPS.first().copied(),
            Some(current) => AGE_GROUPS
                .iter()
                .position(|&g| g == current)
                .and_then(|i| AGE_GROUPS.get(i + 1))
                .copied(),
        };
    }

    /// Step through all meals, then each [`MealTime`].
    pub fn cycle_meal_time(&mut self) {
        self.meal_time = match self.meal_time {
            None => Some(MealTime::Breakfast),
            Some(current) => MealTime::ALL
                .iter()
                .position(|&t| t == current)
                .and_then(|i| MealTime::ALL.get(i + 1))
                .copied(),
        };
    }

    pub fn age_group_label(&self) -> String {
        match self.age_group {
            Some(group) => format!("{}+ months", group),
            None => "All ages".to_string(),
        }
    }

    pub fn meal_time_label(&self) -> &'static str {
        self.meal_time.map_or("All meals", |t| t.label())
    }
}

/// Catalog meals that pass the filter, in catalog order.
///
/// # Example
///
/// ```rust
/// use vitalwatch_types::nutrition::{meals, MealFilter, MealTime};
///
/// assert_eq!(meals(&MealFilter::default()).len(), 6);
///
/// let lunch = MealFilter { meal_time: Some(MealTime::Lunch), ..Default::default() };
/// assert_eq!(meals(&lunch).len(), 2);
/// ```
pub fn meals(filter: &MealFilter) -> Vec<&'static Meal> {
    MEALS.iter().filter(|meal| filter.matches(meal)).collect()
}
