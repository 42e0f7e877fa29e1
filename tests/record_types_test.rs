//! Tests for PersonName and Enrollment validation

use rstest::rstest;

use enroll::domain::{DomainError, Enrollment, Named, PersonName};

#[rstest]
#[case("jane", "doe", "Jane,Doe")]
#[case("JANE", "DOE", "Jane,Doe")]
#[case("jAnE", "dOe", "Jane,Doe")]
#[case("x", "y", "X,Y")]
#[case("zoë", "brontë", "Zoë,Brontë")]
fn given_alphabetic_names_when_rendering_then_title_cased_and_comma_joined(
    #[case] first: &str,
    #[case] last: &str,
    #[case] expected: &str,
) {
    let name = PersonName::new(first, last).unwrap();
    assert_eq!(name.to_string(), expected);
}

#[rstest]
#[case("")]
#[case("j4ne")]
#[case("jane ")]
#[case(" jane")]
#[case("mary-ann")]
#[case("o'neil")]
#[case("   ")]
fn given_bad_first_name_when_creating_then_validation_error(#[case] first: &str) {
    assert_eq!(
        PersonName::new(first, "doe"),
        Err(DomainError::InvalidFirstName(first.to_string()))
    );
    assert!(Enrollment::new(first, "doe", "Algorithms").is_err());
}

#[rstest]
#[case("")]
#[case("d0e")]
#[case("van der berg")]
fn given_bad_last_name_when_creating_then_validation_error(#[case] last: &str) {
    assert_eq!(
        PersonName::new("jane", last),
        Err(DomainError::InvalidLastName(last.to_string()))
    );
}

#[rstest]
#[case("")]
#[case(" ")]
#[case("\t")]
fn given_blank_course_when_creating_then_validation_error(#[case] course: &str) {
    assert_eq!(
        Enrollment::new("jane", "doe", course),
        Err(DomainError::BlankCourse)
    );
}

#[test]
fn given_free_form_course_when_creating_then_kept_verbatim() {
    let enrollment = Enrollment::new("jane", "doe", "python 101: intro").unwrap();
    assert_eq!(enrollment.course(), "python 101: intro");
    assert_eq!(enrollment.to_string(), "Jane,Doe,python 101: intro");
}

#[test]
fn given_enrollment_when_reading_names_then_same_as_person() {
    let person = PersonName::new("ada", "lovelace").unwrap();
    let enrollment = Enrollment::for_person(person.clone(), "Math").unwrap();

    assert_eq!(enrollment.name(), &person);
    assert_eq!(enrollment.first_name(), person.first_name());
    assert_eq!(enrollment.last_name(), person.last_name());
    assert_eq!(enrollment.full_name(), "Ada Lovelace");
}

#[test]
fn given_validation_error_when_displayed_then_names_field() {
    let err = PersonName::new("1", "doe").unwrap_err();
    assert_eq!(
        err.to_string(),
        "The first name should not contain numbers or be blank."
    );
    let err = Enrollment::new("jane", "doe", "").unwrap_err();
    assert_eq!(err.to_string(), "The course name should not be blank.");
}
