use std::collections::BTreeMap;

use crate::engine::Taxonomy;
use crate::model::{CategoryBucket, CourseAggregation, CourseTotal, CourseVolume};

/// Group raw course totals by normalized name, then roll the merged courses
/// up into category and "category - subcategory" buckets.
///
/// Totals are summed across every raw variant of a course; a normalized name
/// enters a bucket's distinct-course list at most once.
pub fn aggregate(taxonomy: &Taxonomy, items: &[CourseTotal]) -> CourseAggregation {
    // Merge raw variants, preserving first-seen order.
    let mut order: Vec<String> = Vec::new();
    let mut merged: BTreeMap<String, CourseVolume> = BTreeMap::new();

    for item in items {
        let course = taxonomy.classify(&item.course);
        match merged.get_mut(&course.normalized) {
            Some(volume) => volume.total += item.total,
            None => {
                order.push(course.normalized.clone());
                merged.insert(course.normalized.clone(), CourseVolume {
                    course,
                    total: item.total,
                });
            }
        }
    }

    let per_course: Vec<CourseVolume> = order
        .iter()
        .map(|name| merged[name].clone())
        .collect();

    let mut per_category: BTreeMap<String, CategoryBucket> = BTreeMap::new();
    let mut per_subcategory: BTreeMap<String, CategoryBucket> = BTreeMap::new();

    for volume in &per_course {
        let category = per_category.entry(volume.course.category.clone()).or_default();
        category.total += volume.total;
        if !category.courses.contains(&volume.course.normalized) {
            category.courses.push(volume.course.normalized.clone());
        }

        if let Some(ref sub) = volume.course.subcategory {
            let key = format!("{} - {}", volume.course.category, sub);
            let bucket = per_subcategory.entry(key).or_default();
            bucket.total += volume.total;
            if !bucket.courses.contains(&volume.course.normalized) {
                bucket.courses.push(volume.course.normalized.clone());
            }
        }
    }

    CourseAggregation { per_course, per_category, per_subcategory }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(course: &str, total: i64) -> CourseTotal {
        CourseTotal { course: course.into(), total }
    }

    #[test]
    fn raw_variants_merge_into_one_course() {
        let tax = Taxonomy::builtin();
        let agg = aggregate(&tax, &[
            item("Informática Básica", 20),
            item("Iforáica Básica", 10),
            item("introdução à informática", 5),
        ]);

        assert_eq!(agg.per_course.len(), 1);
        assert_eq!(agg.per_course[0].course.normalized, "Informática Básica");
        assert_eq!(agg.per_course[0].total, 35);
    }

    #[test]
    fn category_totals_sum_but_names_dedupe() {
        let tax = Taxonomy::builtin();
        let agg = aggregate(&tax, &[
            item("Python", 12),
            item("Pyhon", 8),
            item("Lógica de Programação", 15),
        ]);

        let bucket = &agg.per_category["Lógica e Programação"];
        assert_eq!(bucket.total, 35);
        // Two raw variants of Python contribute the name once.
        assert_eq!(bucket.courses, vec!["Python", "Lógica de Programação"]);
    }

    #[test]
    fn subcategory_keys_compose_category_and_subcategory() {
        let tax = Taxonomy::builtin();
        let agg = aggregate(&tax, &[
            item("Python", 10),
            item("JavaScript", 4),
            item("Lógica de Programação", 6),
        ]);

        let bucket = &agg.per_subcategory["Lógica e Programação - Linguagens"];
        assert_eq!(bucket.total, 14);
        assert_eq!(bucket.courses, vec!["Python", "JavaScript"]);
        // "Lógica de Programação" carries no subcategory, so only the
        // Linguagens bucket exists.
        assert_eq!(agg.per_subcategory.len(), 1);
    }

    #[test]
    fn first_seen_order_is_preserved() {
        let tax = Taxonomy::builtin();
        let agg = aggregate(&tax, &[
            item("Canva", 3),
            item("Python", 9),
            item("Canva para redes sociais", 2),
        ]);

        let names: Vec<&str> = agg.per_course.iter().map(|v| v.course.normalized.as_str()).collect();
        assert_eq!(names, ["Canva", "Python"]);
        assert_eq!(agg.per_course[0].total, 5);
    }

    #[test]
    fn empty_input_yields_empty_aggregation() {
        let tax = Taxonomy::builtin();
        let agg = aggregate(&tax, &[]);
        assert!(agg.per_course.is_empty());
        assert!(agg.per_category.is_empty());
        assert!(agg.per_subcategory.is_empty());
    }
}
