//! Staff model

use serde::{Deserialize, Serialize};

/// Birthday split the way the staff records store it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Birthday {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Month")]
    pub month: String,
    #[serde(rename = "Year")]
    pub year: String,
}

/// Staff record under `staffs/{id}`
///
/// The login flow compares id, email and password against this record.
/// Password handling is plain comparison, matching the upstream data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Staff {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub birthday: Birthday,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Editable subset of the profile screen
#[derive(Debug, Clone, Default)]
pub struct StaffUpdate {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub age: Option<String>,
    pub birthday: Option<Birthday>,
}

impl Staff {
    /// Apply an edit from the profile screen
    pub fn apply(&mut self, update: StaffUpdate) {
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        if let Some(age) = update.age {
            self.age = age;
        }
        if let Some(birthday) = update.birthday {
            self.birthday = birthday;
        }
    }
}
