//! Property tests over the value substrate, text blobs and box blocks.

use proptest::prelude::*;
use proptest::sample::select;

use spark_nodebuf::types::{
    BitField16, BitField32, BitField64, BitField8, Composite4, HorizontalAlignment,
    VerticalAlignment,
};
use spark_nodebuf::{
    Alignment, BitField, BoxConstraints, BoxLayout, BoxLayoutDirection, BoxModel, BoxNode,
    BoxProperties, Length, LengthUnit, NodeBufferBuilder, NodeSpec, TextBlob, TextNode, Utf8Text,
};

fn any_unit() -> impl Strategy<Value = LengthUnit> {
    select(LengthUnit::ALL.to_vec())
}

fn any_length() -> impl Strategy<Value = Length> {
    (-1.0e6f32..1.0e6, any_unit()).prop_map(|(value, unit)| Length::new(value, unit))
}

fn any_horizontal() -> impl Strategy<Value = HorizontalAlignment> {
    (0u8..4).prop_map(HorizontalAlignment::from_bits)
}

fn any_vertical() -> impl Strategy<Value = VerticalAlignment> {
    (0u8..4).prop_map(|v| VerticalAlignment::from_bits(v << 2))
}

fn any_direction() -> impl Strategy<Value = BoxLayoutDirection> {
    (0u8..4).prop_map(|d| BoxLayoutDirection::from_u8(d).unwrap_or_default())
}

/// Set then read every index; fill then toggle every index.
fn check_bit_field<F: BitField>(index: u32) -> Result<(), TestCaseError> {
    let index = index % F::WIDTH;
    let mut field = F::default();

    field.clear();
    field.set(index, true);
    prop_assert!(field.get(index));
    prop_assert_eq!(field.count_ones(), 1);

    field.fill();
    field.toggle(index);
    prop_assert!(!field.get(index));
    prop_assert_eq!(field.count_ones(), F::WIDTH - 1);
    Ok(())
}

proptest! {
    #[test]
    fn unit_is_exactly_one_family(unit in any_unit()) {
        prop_assert_ne!(unit.is_relative(), unit.is_absolute());
        prop_assert_eq!(LengthUnit::from_u8(unit as u8), Some(unit));
    }

    #[test]
    fn absolute_lengths_ignore_context(length in any_length(), vw in 1.0f32..500.0, vh in 1.0f32..500.0) {
        prop_assume!(length.is_absolute());
        let a = length.resolve(&Default::default(), 0.0);
        let b = length.resolve(&spark_nodebuf::LengthContext::new(vw, vh), 123.0);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn alignment_composes_losslessly(h in any_horizontal(), v in any_vertical()) {
        let a = Alignment::new(h, v);
        prop_assert_eq!(a.horizontal(), h);
        prop_assert_eq!(a.vertical(), v);
        prop_assert_eq!(h | v, v | h);
        prop_assert_eq!(Alignment::from_bits(a.bits()), Some(a));
    }

    #[test]
    fn bit_fields_set_and_toggle(index in any::<u32>()) {
        check_bit_field::<BitField8>(index)?;
        check_bit_field::<BitField16>(index)?;
        check_bit_field::<BitField32>(index)?;
        check_bit_field::<BitField64>(index)?;
    }

    #[test]
    fn text_decodes_to_its_chars(text in "\\PC{0,64}") {
        let blob = Utf8Text::new(&text).unwrap();
        let points: Vec<u32> = blob.code_points().collect::<Result<_, _>>().unwrap();
        let expected: Vec<u32> = text.chars().map(u32::from).collect();
        prop_assert_eq!(blob.len(), expected.len());
        prop_assert_eq!(points, expected);

        let reread = Utf8Text::from_bytes(blob.as_bytes()).unwrap();
        prop_assert_eq!(reread.as_str(), text.as_str());
    }

    #[test]
    fn box_blocks_survive_the_buffer(
        lengths in proptest::array::uniform4(any_length()),
        direction in any_direction(),
        h in any_horizontal(),
        v in any_vertical(),
        label in "[a-z ]{0,16}",
    ) {
        let [a, b, c, d] = lengths;
        let props = BoxProperties {
            constraints: Some(BoxConstraints { min_width: a, max_width: b, min_height: c, max_height: d }),
            layout: Some(BoxLayout { direction, spacing: a, alignment: h | v }),
            model: Some(BoxModel { padding: Composite4::sides(a, b, c, d), margin: Composite4::splat(d) }),
            border: None,
        };

        let mut builder = NodeBufferBuilder::new();
        builder.push_box(&NodeSpec::new(1).children([2]), &props).unwrap();
        builder.push_text(&NodeSpec::new(2), &label, props.model.as_ref()).unwrap();
        let buffer = builder.finish().unwrap();
        let view = buffer.view();

        let root = view.find(1).unwrap();
        let kind: BoxNode = root.kind().unwrap();
        prop_assert_eq!(BoxProperties::load(&view, &kind).unwrap(), props);

        let leaf = view.find(2).unwrap();
        let text: TextNode = leaf.kind().unwrap();
        let content = view.text(text.content).unwrap();
        prop_assert_eq!(content.as_str(), label.as_str());
        prop_assert_eq!(view.try_resolve(text.model).unwrap(), props.model);
    }
}
