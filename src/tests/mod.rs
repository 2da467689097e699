mod face_tests;
