use crate::faker::Faker;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub last_name: String,
    pub first_name: String,
    pub middle_name: String,
    pub phone_number: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GetUserResponse {
    pub user: User,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub email: String,
    pub last_name: String,
    pub first_name: String,
    pub middle_name: String,
    pub phone_number: String,
}

impl CreateUserRequest {
    pub fn fake<F: Faker + ?Sized>(faker: &mut F) -> Self {
        Self {
            email: faker.email(),
            last_name: faker.last_name(),
            first_name: faker.first_name(),
            middle_name: faker.middle_name(),
            phone_number: faker.phone_number(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreateUserResponse {
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::faker::RandomFaker;
    use serde_json::json;

    #[test]
    fn request_uses_wire_names() {
        let request = CreateUserRequest::fake(&mut RandomFaker::seeded(1));
        let value = serde_json::to_value(&request).unwrap();
        for key in ["email", "lastName", "firstName", "middleName", "phoneNumber"] {
            assert!(value.get(key).is_some(), "missing {key} in {value}");
        }
        assert!(value.get("last_name").is_none());
    }

    #[test]
    fn response_requires_every_field() {
        let body = json!({
            "user": {
                "id": "7f1c",
                "email": "a@example.com",
                "lastName": "Ivanov",
                "firstName": "Ivan",
                "middleName": "Ivanovich",
                "phoneNumber": "+70000000000"
            }
        });
        let response: CreateUserResponse = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(response.user.first_name, "Ivan");

        let mut partial = body;
        partial["user"].as_object_mut().unwrap().remove("email");
        assert!(serde_json::from_value::<CreateUserResponse>(partial).is_err());
    }
}
